//! URI utilities.

use camino::Utf8Path;
use http::Uri;

/// Deserialize URIs from strings.
///
/// Use with `#[serde(deserialize_with = "api_client::uri::serde::option::deserialize")]`.
pub mod serde {
    /// Optional URIs.
    pub mod option {
        use http::Uri;
        use serde::{Deserialize as _, Deserializer};

        /// Deserialize an optional URI from an optional string
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Uri>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|s| s.parse().map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Extension trait for URIs.
pub trait UriExtension {
    /// Join a path to a URI.
    ///
    /// Relative paths are appended to the existing path, absolute paths replace it.
    fn join<P: AsRef<str>>(self, path: P) -> Uri;
}

impl UriExtension for Uri {
    fn join<P: AsRef<str>>(self, path: P) -> Uri {
        let mut parts = self.into_parts();

        parts.path_and_query = parts.path_and_query.as_ref().map(|pq| {
            let joined = Utf8Path::new(pq.path()).join(path.as_ref());
            http::uri::PathAndQuery::from_maybe_shared(joined.to_string())
                .expect("joined path is a valid path")
        });
        Uri::from_parts(parts).expect("joined URI is valid")
    }
}
