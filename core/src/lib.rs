//! Fetch-style HTTP adapter for fluently built requests.
//!
//! # Overview
//! Turns a request descriptor (method, URI, headers, content) into a single
//! asynchronous call through a fetch-like `Transport`, and normalises the
//! result into a `(body, error)` outcome pair.
//!
//! # Design
//! - `FetchHttpBuilder` fails fast at construction when no transport is
//!   available; the transport is injected rather than looked up globally.
//! - `build()` snapshots the builder, so built requests are immutable.
//! - GET content that parses as JSON is promoted to query parameters;
//!   unparseable GET content is dropped silently. Other methods send content
//!   verbatim.
//! - `send()` always resolves: HTTP error statuses and transport failures
//!   both land in the outcome's error slot.

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod transport;

pub use builder::{
    prepare_request, ExecutableRequest, FetchHttpBuilder, Http, HttpBuilder, Outcome,
};
pub use descriptor::{Descriptor, RequestDescriptor};
pub use error::FetchError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
