//! Error types for the fetch adapter.
//!
//! # Design
//! `FetchUnavailable` is the only construction-time error. The other two
//! variants travel in the failure slot of a `send()` outcome: `HttpStatus`
//! for responses outside the 2xx range, `Transport` for anything the
//! transport call itself raised. Malformed GET content has no variant; it is
//! dropped, not reported.

/// Errors produced while constructing the adapter or sending a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No fetch-capable transport is available.
    #[error(
        "Fetch API is not available in this environment. \
         Please use a polyfill or switch to a different HTTP implementation."
    )]
    FetchUnavailable,

    /// The server answered with a status outside the success range.
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// The transport call failed before a response was available.
    ///
    /// `kind` carries the failure's distinguishing name when the transport
    /// reports one, e.g. `ConnectError` or `TimeoutError`.
    #[error("{message}")]
    Transport {
        kind: Option<String>,
        message: String,
    },
}

impl FetchError {
    /// Build a transport error, substituting a generic message for an empty one.
    pub fn transport(kind: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        FetchError::Transport {
            kind: kind.map(str::to_string),
            message: if message.is_empty() {
                "Fetch request failed".to_string()
            } else {
                message
            },
        }
    }

    /// HTTP status code, for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Distinguishing failure name, for `Transport` errors that carry one.
    pub fn kind(&self) -> Option<&str> {
        match self {
            FetchError::Transport { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_embeds_code_and_text() {
        let err = FetchError::HttpStatus {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn transport_error_keeps_message_and_kind() {
        let err = FetchError::transport(Some("ConnectError"), "connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.kind(), Some("ConnectError"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn empty_transport_message_falls_back() {
        let err = FetchError::transport(None, "");
        assert_eq!(err.to_string(), "Fetch request failed");
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn unavailable_message_names_remediation() {
        let msg = FetchError::FetchUnavailable.to_string();
        assert!(msg.contains("Fetch API is not available"));
        assert!(msg.contains("polyfill"));
    }
}
