//! A client for calling JSON APIs over HTTP / HTTPS.
//!
//! [ApiClient] pairs a base URI with an [Authentication] method and a
//! hyperdriver client service. Individual API clients wrap it and add their
//! own endpoints and models.

use std::future::Future;
use std::sync::Arc;

use http::Method;
use http::Uri;
use hyperdriver::service::SharedService;
pub use secret::Secret;
use tower::ServiceExt;

mod authentication;
pub mod error;
pub mod mock;
pub mod request;
pub mod response;
pub mod uri;

pub use self::authentication::{
    Authentication, AuthenticationLayer, AuthenticationService, BearerAuth,
};
pub use self::error::{Error, HttpResponseError};
pub use self::request::{RequestBuilder, RequestExt};
pub use self::response::Response;
use self::uri::UriExtension as _;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A client for accessing APIs over HTTP / HTTPS
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Arc<Uri>,
    inner: hyperdriver::client::SharedClientService<hyperdriver::Body, hyperdriver::Body>,
}

impl ApiClient {
    /// Create a new API Client which sends requests through `inner`.
    ///
    /// `authentication` is applied to every request before it reaches the
    /// inner service.
    pub fn new_with_inner_service<A, S>(base: Uri, authentication: A, inner: S) -> Self
    where
        A: Authentication + Send + Sync + 'static,
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
        let service = tower::ServiceBuilder::new()
            .layer(SharedService::layer())
            .layer(AuthenticationLayer::new(Arc::new(authentication)))
            .service(inner);

        ApiClient {
            base: Arc::new(base),
            inner: service,
        }
    }

    fn endpoint(&self, endpoint: &str) -> Uri {
        (*self.base).clone().join(endpoint)
    }

    /// Build a POST request against an endpoint relative to the base URI.
    pub fn post(&self, endpoint: &str) -> RequestBuilder {
        RequestBuilder::new(self.clone(), self.endpoint(endpoint), Method::POST)
    }

    /// Send a fully built request.
    pub async fn execute(
        &self,
        req: http::Request<hyperdriver::Body>,
    ) -> Result<Response, hyperdriver::client::Error> {
        let parts = req.parts();

        tracing::trace!(method = %parts.method, uri = %parts.uri, "sending request");
        let response = self.inner.clone().oneshot(req).await?;
        Ok(Response::new(parts, response))
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::mock::MockService;

    #[test]
    fn send_is_send() {
        let client = ApiClient::new_with_inner_service(
            "https://api.example.com/".parse().unwrap(),
            BearerAuth::new(Secret::from("secret garden")),
            MockService::new(),
        );
        let builder = client.post("graphql");

        fn assert_send<T: Send>(_t: T) {}

        let fut = builder.send();
        assert_send(fut);
    }

    #[tokio::test]
    async fn endpoints_join_onto_base() {
        let mock = MockService::new();
        mock.add(
            "/api/graphql",
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"{}".to_vec(),
        );

        let client = ApiClient::new_with_inner_service(
            "https://api.example.com/api/".parse().unwrap(),
            BearerAuth::new("secret garden"),
            mock.clone(),
        );

        let response = client.post("graphql").send().await.unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/api/graphql");
    }
}
