//! An in-process transport for testing API clients without a network.
//!
//! [MockService] answers requests by path with canned responses, and records
//! every request it sees so tests can assert on what was sent.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt as _;
use parking_lot::Mutex;

use crate::BoxFuture;

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: http::StatusCode,
    headers: http::HeaderMap,
    body: Bytes,
}

impl MockResponse {
    /// Create a canned response.
    pub fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(MockResponse),
    Fail,
}

/// A request as seen by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: http::Method,

    /// Request path, without the query
    pub path: String,

    /// Request headers, after authentication was applied
    pub headers: http::HeaderMap,

    /// Request body
    pub body: Bytes,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<String, Reply>,
    requests: Vec<RecordedRequest>,
}

/// A `tower::Service` which stands in for the HTTP transport.
///
/// Clones share configuration and the request log. Paths without a
/// configured reply are answered with `404 Not Found`.
#[derive(Debug, Default, Clone)]
pub struct MockService {
    state: Arc<Mutex<MockState>>,
}

impl MockService {
    /// Create a mock with no configured replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to requests for `path` with a canned response.
    pub fn add(
        &self,
        path: &str,
        status: http::StatusCode,
        headers: http::HeaderMap,
        body: Vec<u8>,
    ) {
        let response = MockResponse::new(status, headers, body);
        self.state
            .lock()
            .replies
            .insert(path.to_owned(), Reply::Respond(response));
    }

    /// Reply to requests for `path` with a JSON document.
    pub fn add_json(&self, path: &str, status: http::StatusCode, body: &serde_json::Value) {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        let body = serde_json::to_vec(body).expect("JSON values always serialize");
        self.add(path, status, headers, body);
    }

    /// Fail requests for `path` at the transport level, as if the connection dropped.
    pub fn fail(&self, path: &str) {
        self.state
            .lock()
            .replies
            .insert(path.to_owned(), Reply::Fail);
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }
}

impl tower::Service<http::Request<hyperdriver::Body>> for MockService {
    type Response = http::Response<hyperdriver::Body>;
    type Error = hyperdriver::client::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<hyperdriver::Body>) -> Self::Future {
        let state = self.state.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body
                .collect()
                .await
                .map(|collected| collected.to_bytes())
                .unwrap_or_default();

            let path = parts.uri.path().to_owned();
            let reply = {
                let mut state = state.lock();
                state.requests.push(RecordedRequest {
                    method: parts.method.clone(),
                    path: path.clone(),
                    headers: parts.headers.clone(),
                    body,
                });
                state.replies.get(&path).cloned()
            };

            let response = match reply {
                Some(Reply::Respond(response)) => response,
                Some(Reply::Fail) => return Err(hyperdriver::client::Error::RequestTimeout),
                None => {
                    tracing::warn!(%path, "no mock reply configured");
                    MockResponse::new(http::StatusCode::NOT_FOUND, Default::default(), Vec::new())
                }
            };

            let mut builder = http::Response::builder()
                .status(response.status)
                .version(http::Version::HTTP_11);

            for (key, value) in response.headers.iter() {
                builder = builder.header(key, value);
            }

            Ok(builder
                .body(hyperdriver::Body::from(response.body))
                .expect("mock response is valid"))
        })
    }
}
