//! Building and sending requests with an [ApiClient].

use bytes::Bytes;
use http::{header::HeaderValue, HeaderName, Uri};
use serde::Serialize;

use crate::{response::Response, ApiClient, Error};

/// Extension methods for `http` requests.
pub trait RequestExt {
    /// A copy of the request head, without the body.
    fn parts(&self) -> http::request::Parts;
}

impl<B> RequestExt for http::Request<B> {
    fn parts(&self) -> http::request::Parts {
        let mut builder = http::request::Request::builder()
            .uri(self.uri().clone())
            .method(self.method().clone())
            .version(self.version());

        if let Some(headers) = builder.headers_mut() {
            *headers = self.headers().clone();
        }

        let (parts, _) = builder
            .body(())
            .expect("parts copied from a valid request")
            .into_parts();
        parts
    }
}

/// A request under construction, bound to the client which will send it.
#[derive(Debug)]
pub struct RequestBuilder {
    req: http::request::Builder,
    client: ApiClient,
    body: Option<hyperdriver::Body>,
}

impl RequestBuilder {
    /// Start a new request with `method` against `uri`.
    pub fn new(client: ApiClient, uri: Uri, method: http::Method) -> Self {
        Self {
            req: http::Request::builder().method(method).uri(uri),
            client,
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.req = self.req.header(key, value);
        self
    }

    /// Set a raw request body.
    pub fn body<B: Into<hyperdriver::Body>>(self, body: B) -> Self {
        Self {
            body: Some(body.into()),
            ..self
        }
    }

    /// Serialize `value` as the JSON request body, and set the content type.
    pub fn json<T>(self, value: &T) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(value).map_err(Error::Serialize)?;
        Ok(self
            .header(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .body(Bytes::from(payload)))
    }

    /// Assemble the request without sending it.
    pub fn build(self) -> Result<http::Request<hyperdriver::Body>, Error> {
        Ok(self
            .req
            .body(self.body.unwrap_or_else(hyperdriver::Body::empty))?)
    }

    /// Send the request.
    ///
    /// Any status is returned as a [Response]; use [Response::error_for_status]
    /// to treat non-success statuses as errors.
    pub async fn send(self) -> Result<Response, Error> {
        let client = self.client.clone();
        let req = self.build()?;
        Ok(client.execute(req).await?)
    }
}
