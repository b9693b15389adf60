//! HTTP transport types handed between the adapter and its transport.
//!
//! # Design
//! Requests and responses are plain data. The adapter composes an
//! `HttpRequest` from the descriptor and gives it to a `Transport`; the
//! transport answers with an `HttpResponse` whose body, for 2xx statuses, has
//! already been read in full. Owned `String`/`Vec` fields keep both types
//! free of lifetimes so they can move into async transports.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case method token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request options passed to a transport.
///
/// `url` is already fully composed (base URL, URI and any promoted query
/// string). `body` is `None` for GET and for requests without content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` is only read for 2xx responses; it is empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range, like fetch's `Response.ok`.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            status_text: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn ok_covers_exactly_the_2xx_range() {
        assert!(!response(199).ok());
        assert!(response(200).ok());
        assert!(response(204).ok());
        assert!(response(299).ok());
        assert!(!response(304).ok());
        assert!(!response(404).ok());
        assert!(!response(500).ok());
    }

    #[test]
    fn method_tokens_are_upper_case() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }
}
