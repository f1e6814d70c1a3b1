//! Client for the Github GraphQL API, focused on commit lookups.
//!
//! [GithubGraphQL] sends queries built by [query], and [classify] sorts the
//! resulting payload into a single [ClassifiedOutcome].

use api_client::{ApiClient, BearerAuth, HttpResponseError, Secret};
use async_trait::async_trait;
use http::header;
use http::{HeaderValue, Uri};
use hyperdriver::client::conn::transport::tcp::TcpTransportConfig;
use hyperdriver::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod classify;
mod config;
pub mod models;
pub mod query;

pub use crate::classify::{classify, ClassifiedOutcome};
pub use crate::config::{ConfigError, GithubConfig, TOKEN_VARIABLE};
pub use crate::models::{GraphQLResponse, RawApiResult};
pub use crate::query::{CommitQuery, CommitReference, GraphQLRequest};

const GITHUB_ACCEPT: &str = "application/json";
const GRAPHQL_ENDPOINT: &str = "graphql";
const USER_AGENT: &str = concat!("octocat/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when querying the Github API.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent, or the body could not be read or decoded.
    #[error("Sending request: {0}")]
    Request(#[from] api_client::Error),

    /// A response not in the 200-299 range.
    #[error("Response: {0}")]
    Response(#[from] HttpResponseError),
}

/// Something which can run a commit query.
///
/// [GithubGraphQL] is the real implementation. The seam exists so the
/// callers' handling of each outcome can be exercised without a network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Run the query and return the unvalidated result.
    async fn fetch(&self, query: &CommitQuery) -> Result<RawApiResult, Error>;

    /// Look up a commit and classify the result.
    ///
    /// Fetch failures are reported as [ClassifiedOutcome::TransportError].
    async fn commit(&self, reference: &CommitReference) -> ClassifiedOutcome {
        let outcome = match self.fetch(&reference.query()).await {
            Ok(result) => classify(&result),
            Err(error) => {
                tracing::warn!(%reference, %error, "commit query failed");
                ClassifiedOutcome::TransportError
            }
        };
        tracing::debug!(%reference, outcome = outcome.kind(), "classified");
        outcome
    }
}

/// A Github GraphQL client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct GithubGraphQL {
    client: ApiClient,
}

impl GithubGraphQL {
    /// Create a client for the API rooted at `api_base`.
    pub fn with_api_base<K: Into<Secret>>(api_base: Uri, token: K) -> Self {
        let tcp = TcpTransportConfig::default();

        let client = Client::builder()
            .layer(
                tower_http::set_header::SetRequestHeaderLayer::if_not_present(
                    header::ACCEPT,
                    HeaderValue::from_static(GITHUB_ACCEPT),
                ),
            )
            .with_tcp(tcp)
            .with_auto_http()
            .with_user_agent(USER_AGENT.to_owned())
            .build_service();

        Self::with_inner_service(api_base, token, client)
    }

    /// Create a client which sends requests through `inner` rather than the network.
    pub fn with_inner_service<K, S>(api_base: Uri, token: K, inner: S) -> Self
    where
        K: Into<Secret>,
        S: tower::Service<
                http::Request<hyperdriver::Body>,
                Response = http::Response<hyperdriver::Body>,
                Error = hyperdriver::client::Error,
            > + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        Self {
            client: ApiClient::new_with_inner_service(api_base, BearerAuth::new(token), inner),
        }
    }

    /// Create a client from configuration, reading the token from the environment if needed.
    pub fn from_config(config: &GithubConfig) -> Result<Self, ConfigError> {
        let token = config.resolve_token()?;
        Ok(Self::with_api_base(config.api_base(), token))
    }

    /// Send a GraphQL request and decode the response envelope.
    #[tracing::instrument(skip_all)]
    pub async fn query<V, T>(&self, request: &GraphQLRequest<V>) -> Result<GraphQLResponse<T>, Error>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(GRAPHQL_ENDPOINT)
            .json(request)?
            .send()
            .await?;

        let uri = response.uri().clone();
        let response = response.error_for_status().await.inspect_err(|error| {
            tracing::error!(%uri, "Error response from github: {:?}", error.status);
        })?;

        let body = response.text().await?;
        tracing::trace!(%uri, "graphql response: {body}");
        let envelope = serde_json::from_str(&body).map_err(api_client::Error::Deserialize)?;
        Ok(envelope)
    }
}

#[async_trait]
impl Fetcher for GithubGraphQL {
    async fn fetch(&self, query: &CommitQuery) -> Result<RawApiResult, Error> {
        self.query(query).await
    }
}
