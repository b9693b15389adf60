//! The transport seam and its default reqwest-backed implementation.
//!
//! # Design
//! A transport takes a fully composed `HttpRequest` and performs one network
//! round trip. It reports HTTP error statuses as data (an `HttpResponse`),
//! and only returns `Err` when no response could be obtained at all. The
//! adapter decides what counts as success. Bodies of non-2xx responses are
//! not read.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// A fetch-like network primitive: URL plus options in, response out.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Default transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    ///
    /// Fails with `FetchUnavailable` if the client cannot be initialised,
    /// e.g. when the TLS backend fails to load.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            log::warn!("failed to initialise HTTP client: {e}");
            FetchError::FetchUnavailable
        })?;
        Ok(Self { client })
    }

    /// Wrap a caller-configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(to_fetch_error)?;

        let status = response.status();
        let status_text = reason_phrase(&response);
        // Non-2xx bodies stay unread.
        let body = if status.is_success() {
            response.text().await.map_err(to_fetch_error)?
        } else {
            String::new()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// The server's reason phrase, or the canonical one for the status code.
///
/// hyper only records the phrase when it differs from the canonical text.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

fn to_fetch_error(err: reqwest::Error) -> FetchError {
    FetchError::transport(Some(error_kind(&err)), err.to_string())
}

/// Name the reqwest failure class.
fn error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "TimeoutError"
    } else if err.is_connect() {
        "ConnectError"
    } else if err.is_redirect() {
        "RedirectError"
    } else if err.is_builder() {
        "BuilderError"
    } else if err.is_body() {
        "BodyError"
    } else if err.is_decode() {
        "DecodeError"
    } else {
        "RequestError"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_onto_reqwest() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(HttpMethod::Options), reqwest::Method::OPTIONS);
    }

    #[tokio::test]
    async fn unparseable_url_is_a_builder_error() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .fetch(HttpRequest {
                method: HttpMethod::Get,
                url: "not a url".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some("BuilderError"));
        assert!(!err.to_string().is_empty());
    }
}
