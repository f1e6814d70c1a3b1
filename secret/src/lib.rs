//! Credential wrapper shared by the API clients.

use std::{borrow::Cow, fmt};

use http::{header::InvalidHeaderValue, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

/// A credential could not be read from the environment.
#[derive(Debug, Error)]
pub enum MissingSecret {
    /// The variable is not set.
    #[error("environment variable {0} is not set")]
    NotPresent(String),

    /// The variable is set, but to an empty value.
    #[error("environment variable {0} is empty")]
    Empty(String),

    /// The variable is set, but is not valid unicode.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

/// A semi-secret value, such as an API token.
///
/// The wrapped value never appears in `Debug` output, and owned values are
/// zeroed when dropped. Use [Secret::revealed] to get at the underlying value.
#[derive(Clone, Deserialize, Serialize)]
#[serde(from = "String")]
pub struct Secret(Cow<'static, str>);

impl Secret {
    /// Read a secret from an environment variable.
    ///
    /// An empty variable is treated the same as a missing one.
    pub fn from_env(var: &str) -> Result<Self, MissingSecret> {
        match std::env::var(var) {
            Ok(value) => {
                let secret = Secret(value.into());
                if secret.is_blank() {
                    Err(MissingSecret::Empty(var.to_owned()))
                } else {
                    Ok(secret)
                }
            }
            Err(std::env::VarError::NotPresent) => Err(MissingSecret::NotPresent(var.to_owned())),
            Err(std::env::VarError::NotUnicode(_)) => {
                Err(MissingSecret::NotUnicode(var.to_owned()))
            }
        }
    }

    /// Expose the underlying value.
    pub fn revealed(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// A sensitive `Authorization` header value using the bearer scheme.
    pub fn bearer(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut header = HeaderValue::try_from(format!("Bearer {}", self.revealed()))?;
        header.set_sensitive(true);
        Ok(header)
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        if let Cow::Owned(ref mut s) = self.0 {
            s.zeroize()
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value.into())
    }
}

impl From<&'static str> for Secret {
    fn from(value: &'static str) -> Self {
        Secret(value.into())
    }
}

impl From<Cow<'static, str>> for Secret {
    fn from(inner: Cow<'static, str>) -> Self {
        Secret(inner)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn debug_does_not_reveal() {
        let token = Secret::from("ghp_not_a_real_token");

        assert!(!format!("{token:?}").contains("ghp_"));
        assert_eq!(&format!("{token:?}"), "Secret(****)");
        assert_eq!(token.revealed(), "ghp_not_a_real_token");
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let header = Secret::from("abc123").bearer().unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer abc123");
        assert!(header.is_sensitive());
    }

    #[test]
    fn bearer_rejects_control_characters() {
        let token = Secret::from(String::from("abc\n123"));
        assert!(token.bearer().is_err());
    }

    #[test]
    fn deserializes_from_plain_string() {
        let token: Secret = serde_json::from_str("\"from-config\"").unwrap();
        assert_eq!(token.revealed(), "from-config");
    }

    #[test]
    fn whitespace_is_blank() {
        assert!(Secret::from("").is_blank());
        assert!(Secret::from(" \t\n").is_blank());
        assert!(!Secret::from(" ghp_padded ").is_blank());
    }

    #[test]
    fn missing_variable() {
        let err = Secret::from_env("COMMIT_EMBED_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, MissingSecret::NotPresent(_)));
    }
}
