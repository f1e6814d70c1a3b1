use http::Uri;
use secret::{MissingSecret, Secret};
use serde::Deserialize;

/// Environment variable holding the Github token when it is not configured.
pub const TOKEN_VARIABLE: &str = "GITHUB_TOKEN";

const GITHUB_API_BASE: &str = "https://api.github.com/";

/// The Github token could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No token configured, and none in the environment.
    #[error("Github token: {0}")]
    Token(#[from] MissingSecret),

    /// The configured token is empty or only whitespace.
    #[error("Github token in configuration is empty")]
    EmptyToken,
}

/// Configuration for the Github GraphQL client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubConfig {
    /// Personal access or installation token.
    ///
    /// Falls back to the `GITHUB_TOKEN` environment variable.
    #[serde(default)]
    pub token: Option<Secret>,

    /// API root, for Github Enterprise. The GraphQL endpoint is `graphql` below it.
    #[serde(default, deserialize_with = "api_client::uri::serde::option::deserialize")]
    pub api_base: Option<Uri>,
}

impl GithubConfig {
    /// The configured token, or the one from the environment.
    pub fn resolve_token(&self) -> Result<Secret, ConfigError> {
        match &self.token {
            Some(token) if token.is_blank() => Err(ConfigError::EmptyToken),
            Some(token) => Ok(token.clone()),
            None => Ok(Secret::from_env(TOKEN_VARIABLE)?),
        }
    }

    /// The API root, defaulting to public Github.
    pub fn api_base(&self) -> Uri {
        self.api_base
            .clone()
            .unwrap_or_else(|| Uri::from_static(GITHUB_API_BASE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let config: GithubConfig = serde_json::from_str(
            r#"{"token": "ghp_configured", "api_base": "https://ghe.example.com/api/"}"#,
        )
        .unwrap();

        assert_eq!(config.resolve_token().unwrap().revealed(), "ghp_configured");
        assert_eq!(config.api_base().to_string(), "https://ghe.example.com/api/");
    }

    #[test]
    fn default_api_base() {
        let config: GithubConfig = serde_json::from_str(r#"{"token": "t"}"#).unwrap();
        assert_eq!(config.api_base().to_string(), GITHUB_API_BASE);
    }

    #[test]
    fn empty_token_is_rejected() {
        let config: GithubConfig = serde_json::from_str(r#"{"token": ""}"#).unwrap();
        assert!(matches!(
            config.resolve_token(),
            Err(ConfigError::EmptyToken)
        ));
    }

    #[test]
    fn whitespace_token_is_rejected() {
        let config: GithubConfig = serde_json::from_str(r#"{"token": "  \n"}"#).unwrap();
        assert!(matches!(
            config.resolve_token(),
            Err(ConfigError::EmptyToken)
        ));
    }

    #[test]
    fn invalid_api_base() {
        let result = serde_json::from_str::<GithubConfig>(r#"{"api_base": "not a uri"}"#);
        assert!(result.is_err());
    }
}
