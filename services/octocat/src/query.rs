//! GraphQL requests against the Github API.

use std::fmt;

use serde::Serialize;

/// Commit metadata for a revision expression, resolved within one repository.
///
/// Inputs travel as variables, so they never change the shape of the document.
pub const COMMIT_QUERY: &str = r#"query CommitInfo($owner: String!, $name: String!, $expression: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $expression) {
      ... on Commit {
        messageHeadline
        abbreviatedOid
        changedFiles
        commitUrl
        pushedDate
        author {
          avatarUrl
          name
          user {
            login
            avatarUrl
            url
          }
        }
      }
    }
  }
}"#;

/// The body of a GraphQL request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQLRequest<V> {
    /// The GraphQL document.
    pub query: &'static str,

    /// Values bound to the document's variables.
    pub variables: V,
}

/// Variables bound by [COMMIT_QUERY].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitVariables {
    /// Repository owner (user or organization login).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Revision expression, e.g. a branch, tag or abbreviated SHA.
    pub expression: String,
}

/// A request for commit metadata.
pub type CommitQuery = GraphQLRequest<CommitVariables>;

/// Build the commit metadata request for `expression` in `owner/repository`.
pub fn build(owner: &str, repository: &str, expression: &str) -> CommitQuery {
    GraphQLRequest {
        query: COMMIT_QUERY,
        variables: CommitVariables {
            owner: owner.to_owned(),
            name: repository.to_owned(),
            expression: expression.to_owned(),
        },
    }
}

/// A commit-ish in a specific Github repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitReference {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repository: String,

    /// Revision expression, passed verbatim to Github.
    pub expression: String,
}

impl CommitReference {
    /// Create a new reference. All three parts must be non-empty.
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        let reference = Self {
            owner: owner.into(),
            repository: repository.into(),
            expression: expression.into(),
        };

        debug_assert!(
            !reference.owner.is_empty()
                && !reference.repository.is_empty()
                && !reference.expression.is_empty(),
            "commit reference parts must be non-empty: {reference:?}"
        );

        reference
    }

    /// The GraphQL request for this reference.
    pub fn query(&self) -> CommitQuery {
        build(&self.owner, &self.repository, &self.expression)
    }
}

impl fmt::Display for CommitReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repository, self.expression)
    }
}
