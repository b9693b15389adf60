//! Fetch-backed request builder and the executable request it produces.
//!
//! # Design
//! `FetchHttpBuilder` owns a base URL, an injected `Transport` and a
//! `RequestDescriptor`. `build()` snapshots all of it into an
//! `ExecutableRequest`, so mutating the builder afterwards never changes a
//! request that was already built. `send()` never fails outright: every
//! failure lands in the second slot of the returned outcome pair.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Number, Value};

use crate::descriptor::{Descriptor, RequestDescriptor};
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::{ReqwestTransport, Transport};

/// Result of `send()`: the response text, or an empty string and the failure.
pub type Outcome = (String, Option<FetchError>);

/// A request that can be sent.
#[async_trait]
pub trait Http: Send + Sync {
    async fn send(&self) -> Outcome;
}

/// Factory for send-capable requests.
pub trait HttpBuilder {
    type Http: Http;

    fn build(&self) -> Self::Http;
}

/// Request builder that sends through a fetch-style `Transport`.
#[derive(Clone)]
pub struct FetchHttpBuilder {
    base_url: String,
    transport: Arc<dyn Transport>,
    descriptor: RequestDescriptor,
}

impl FetchHttpBuilder {
    /// Create a builder using the default reqwest transport.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new()?);
        Self::with_transport(base_url, Some(transport))
    }

    /// Create a builder around an injected transport.
    ///
    /// `None` means no fetch-capable transport exists, and construction fails
    /// with `FetchUnavailable`.
    pub fn with_transport(
        base_url: &str,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self, FetchError> {
        let transport = transport.ok_or(FetchError::FetchUnavailable)?;
        Ok(Self {
            base_url: base_url.to_string(),
            transport,
            descriptor: RequestDescriptor::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_uri(&mut self, uri: &str) -> &mut Self {
        self.descriptor.set_uri(uri);
        self
    }

    pub fn set_method(&mut self, method: HttpMethod) -> &mut Self {
        self.descriptor.set_method(method);
        self
    }

    pub fn add_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.descriptor.add_header(name, value);
        self
    }

    pub fn set_content(&mut self, content: &str) -> &mut Self {
        self.descriptor.set_content(content);
        self
    }

    /// Snapshot the current state into an `ExecutableRequest`.
    pub fn build(&self) -> ExecutableRequest {
        ExecutableRequest {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
            descriptor: self.descriptor.clone(),
        }
    }
}

impl Descriptor for FetchHttpBuilder {
    fn uri(&self) -> &str {
        self.descriptor.uri()
    }

    fn method(&self) -> HttpMethod {
        self.descriptor.method()
    }

    fn headers(&self) -> &std::collections::BTreeMap<String, String> {
        self.descriptor.headers()
    }

    fn content(&self) -> Option<&str> {
        self.descriptor.content()
    }
}

impl HttpBuilder for FetchHttpBuilder {
    type Http = ExecutableRequest;

    fn build(&self) -> ExecutableRequest {
        FetchHttpBuilder::build(self)
    }
}

impl std::fmt::Debug for FetchHttpBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchHttpBuilder")
            .field("base_url", &self.base_url)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// A built request, closed over the builder state at `build()` time.
#[derive(Clone)]
pub struct ExecutableRequest {
    base_url: String,
    transport: Arc<dyn Transport>,
    descriptor: RequestDescriptor,
}

impl ExecutableRequest {
    /// The request options this request hands to the transport.
    pub fn request(&self) -> HttpRequest {
        prepare_request(&self.base_url, &self.descriptor)
    }

    /// Perform the call and return the outcome pair.
    pub async fn send(&self) -> Outcome {
        match self.try_send().await {
            Ok(body) => (body, None),
            Err(err) => (String::new(), Some(err)),
        }
    }

    /// Perform the call, returning the response text or the failure.
    pub async fn try_send(&self) -> Result<String, FetchError> {
        let request = self.request();
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.fetch(request).await.map_err(|err| {
            log::warn!("transport failure: {err}");
            err
        })?;

        if !response.ok() {
            log::warn!("HTTP {} {}", response.status, response.status_text);
            return Err(FetchError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response.body)
    }
}

#[async_trait]
impl Http for ExecutableRequest {
    async fn send(&self) -> Outcome {
        ExecutableRequest::send(self).await
    }
}

impl std::fmt::Debug for ExecutableRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableRequest")
            .field("base_url", &self.base_url)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Compose the transport request from a base URL and a descriptor.
///
/// GET content that parses as JSON becomes query parameters; GET content
/// that does not parse is dropped. Any other method sends content verbatim.
pub fn prepare_request<D: Descriptor + ?Sized>(base_url: &str, descriptor: &D) -> HttpRequest {
    let method = descriptor.method();
    let mut url = format!("{base_url}{}", descriptor.uri());
    let content = descriptor.content().filter(|c| !c.is_empty());

    let body = match (method, content) {
        (HttpMethod::Get, Some(content)) => {
            match serde_json::from_str::<Value>(content) {
                Ok(params) => {
                    let query = query_string(&params);
                    if !query.is_empty() {
                        url.push(if url.contains('?') { '&' } else { '?' });
                        url.push_str(&query);
                    }
                }
                Err(e) => log::debug!("dropping non-JSON GET content: {e}"),
            }
            None
        }
        (_, content) => content.map(str::to_string),
    };

    let headers = descriptor
        .headers()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    HttpRequest {
        method,
        url,
        headers,
        body,
    }
}

/// Form-encode the top-level entries of a JSON value.
///
/// Objects contribute their entries in document order, arrays their
/// index/element pairs. Scalars have no entries.
fn query_string(params: &Value) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    match params {
        Value::Object(map) => {
            for (key, value) in map {
                serializer.append_pair(key, &stringify(value));
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                serializer.append_pair(&index.to_string(), &stringify(value));
            }
        }
        _ => {}
    }
    serializer.finish()
}

/// Render a JSON value the way JavaScript's `String(value)` does.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Format a number like JavaScript's `Number.prototype.toString`.
///
/// Integral floats print without a fraction, `-0` prints as `0`, and
/// magnitudes outside `[1e-6, 1e21)` use exponent notation with a signed
/// exponent (`1e+21`, `1e-7`).
fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&f.abs()) {
        // f64 Display is shortest round-trip and drops a zero fraction.
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}
