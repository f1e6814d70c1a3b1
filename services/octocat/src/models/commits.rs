//! Commit data models.

use serde::{Deserialize, Serialize};

/// The `data` member of a commit query response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryData {
    /// The repository, null when it does not exist or is not visible.
    #[serde(default)]
    pub repository: Option<RepositoryNode>,
}

/// A repository, as far as the commit query selects it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryNode {
    /// The git object the expression resolved to.
    ///
    /// Kept as raw JSON: a non-commit object resolves to `{}` because the
    /// query only selects fields on `Commit`.
    #[serde(default)]
    pub object: Option<serde_json::Value>,
}

impl RepositoryData {
    /// The resolved git object, if both the repository and the object exist.
    pub fn object(&self) -> Option<&serde_json::Value> {
        self.repository
            .as_ref()
            .and_then(|repository| repository.object.as_ref())
            .filter(|object| !object.is_null())
    }
}

/// Commit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    /// First line of the commit message.
    #[serde(default)]
    pub message_headline: Option<String>,

    /// Short SHA.
    pub abbreviated_oid: String,

    /// Number of files changed by the commit.
    pub changed_files: u64,

    /// Web URL of the commit.
    pub commit_url: String,

    /// When the commit was pushed, as an ISO-8601 timestamp.
    #[serde(default)]
    pub pushed_date: Option<String>,

    /// The git author.
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

impl CommitInfo {
    /// The display title: the short SHA in code formatting, followed by the headline.
    ///
    /// Without a headline, the title is just the short SHA.
    pub fn title(&self) -> String {
        match self.message_headline.as_deref() {
            Some(headline) if !headline.is_empty() => {
                format!("`{}` {}", self.abbreviated_oid, headline)
            }
            _ => self.abbreviated_oid.clone(),
        }
    }

    /// The linked Github user, if the author maps to one.
    pub fn user(&self) -> Option<&CommitUser> {
        self.author.as_ref().and_then(|author| author.user.as_ref())
    }
}

/// The git author of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAuthor {
    /// Avatar derived from the author's email.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Name recorded in the commit.
    #[serde(default)]
    pub name: Option<String>,

    /// The Github user the author's email belongs to.
    #[serde(default)]
    pub user: Option<CommitUser>,
}

/// A Github user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitUser {
    /// Username
    pub login: String,

    /// Profile picture URL
    pub avatar_url: String,

    /// Profile URL
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(headline: Option<&str>) -> CommitInfo {
        CommitInfo {
            message_headline: headline.map(str::to_owned),
            abbreviated_oid: "a1b2c3d".into(),
            changed_files: 1,
            commit_url: "https://github.com/acme/widgets/commit/a1b2c3d".into(),
            pushed_date: None,
            author: None,
        }
    }

    #[test]
    fn title_with_headline() {
        assert_eq!(commit(Some("Fix bug")).title(), "`a1b2c3d` Fix bug");
    }

    #[test]
    fn title_without_headline() {
        assert_eq!(commit(None).title(), "a1b2c3d");
        assert_eq!(commit(Some("")).title(), "a1b2c3d");
    }

    #[test]
    fn deserialize_commit_with_user() {
        let info: CommitInfo = serde_json::from_str(
            r#"{
                "messageHeadline": "Add widgets",
                "abbreviatedOid": "0badc0d",
                "changedFiles": 12,
                "commitUrl": "https://github.com/acme/widgets/commit/0badc0d",
                "pushedDate": "2024-03-05T10:11:12Z",
                "author": {
                    "avatarUrl": "https://avatars.example/gravatar.png",
                    "name": "Jo Doe",
                    "user": {
                        "login": "jodoe",
                        "avatarUrl": "https://avatars.example/u/1",
                        "url": "https://github.com/jodoe"
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(info.changed_files, 12);
        assert_eq!(info.user().map(|user| user.login.as_str()), Some("jodoe"));
    }

    #[test]
    fn object_accessor_ignores_null() {
        let data: RepositoryData =
            serde_json::from_str(r#"{"repository":{"object":null}}"#).unwrap();
        assert!(data.object().is_none());

        let data: RepositoryData = serde_json::from_str(r#"{"repository":null}"#).unwrap();
        assert!(data.object().is_none());
    }
}
