//! Github GraphQL response models.
//!
//! These mirror the JSON returned by the API closely and are deliberately
//! lenient: every level of the payload may be missing or null.

use serde::Deserialize;

pub mod commits;

pub use commits::{CommitAuthor, CommitInfo, CommitUser, RepositoryData, RepositoryNode};

/// The error type Github reports when an object cannot be resolved.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// A GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphQLResponse<T> {
    /// The query result, absent when the request failed outright.
    #[serde(default)]
    pub data: Option<T>,

    /// Errors reported alongside (or instead of) the data.
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    /// Reported errors, or an empty slice.
    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Whether any reported error has the `NOT_FOUND` type.
    pub fn has_not_found(&self) -> bool {
        self.errors().iter().any(GraphQLError::is_not_found)
    }
}

/// A single GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Machine readable error type, e.g. `NOT_FOUND`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Human readable message.
    #[serde(default)]
    pub message: String,

    /// Path to the field which failed.
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

impl GraphQLError {
    /// Whether this error reports a missing object.
    pub fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some(NOT_FOUND)
    }
}

/// The unvalidated result of a commit query.
pub type RawApiResult = GraphQLResponse<RepositoryData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_without_data() {
        let response: RawApiResult = serde_json::from_str(
            r#"{"errors":[{"type":"NOT_FOUND","message":"Could not resolve to a Repository with the name 'acme/nope'."}]}"#,
        )
        .unwrap();

        assert!(response.data.is_none());
        assert!(response.has_not_found());
    }

    #[test]
    fn error_without_type() {
        let response: RawApiResult =
            serde_json::from_str(r#"{"data":null,"errors":[{"message":"Something went wrong"}]}"#)
                .unwrap();

        assert_eq!(response.errors().len(), 1);
        assert!(!response.has_not_found());
    }

    #[test]
    fn rest_style_error_body() {
        let response: RawApiResult = serde_json::from_str(
            r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/graphql"}"#,
        )
        .unwrap();

        assert!(response.data.is_none());
        assert!(response.errors().is_empty());
    }
}
