//! Request descriptors: the accumulated request state read by the adapter.
//!
//! # Design
//! The adapter only needs read access to the URI, method, headers and
//! content, so it depends on the `Descriptor` trait rather than on a concrete
//! builder. `RequestDescriptor` is the plain implementation used by
//! `FetchHttpBuilder`; its setters return `&mut Self` so calls chain.

use std::collections::BTreeMap;

use crate::http::HttpMethod;

/// Read access to a fluently configured request.
pub trait Descriptor {
    fn uri(&self) -> &str;
    fn method(&self) -> HttpMethod;
    /// Header names are case-sensitive as stored.
    fn headers(&self) -> &BTreeMap<String, String>;
    /// Raw body content, if any was set.
    fn content(&self) -> Option<&str>;
}

/// Method, URI, headers and content of a request yet to be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    uri: String,
    method: HttpMethod,
    headers: BTreeMap<String, String>,
    content: Option<String>,
}

impl RequestDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_uri(&mut self, uri: &str) -> &mut Self {
        self.uri = uri.to_string();
        self
    }

    pub fn set_method(&mut self, method: HttpMethod) -> &mut Self {
        self.method = method;
        self
    }

    /// Set a header. A later call with the same name replaces the value.
    pub fn add_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn set_content(&mut self, content: &str) -> &mut Self {
        self.content = Some(content.to_string());
        self
    }
}

impl Descriptor for RequestDescriptor {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}
