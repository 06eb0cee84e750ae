//! Resource-level error types and the error normalization policy.
//!
//! Every failed request funnels through one policy before reaching the
//! caller:
//!
//! - **Non-2xx response**: the body's `error` field becomes the message
//! - **Transport failure**: the failure's payload `error` field, if any
//! - **Anything else**: the literal [`SERVER_ERROR_MESSAGE`]
//!
//! The result is always [`ResourceError::Server`]. Raw transport error
//! shapes never escape the resource client.
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_client::rest::ResourceError;
//!
//! match comments.get(&1).await {
//!     Ok(comment) => println!("Found: {}", comment.name),
//!     Err(ResourceError::Server { status: Some(404), message }) => {
//!         println!("missing: {message}");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::clients::TransportError;

/// Message used when a failure carries no usable `error` field.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use resource_client::rest::ResourceError;
/// use serde_json::json;
///
/// let error = ResourceError::from_http_response(422, &json!({"error": "name is required"}));
/// assert_eq!(error.to_string(), "name is required");
/// assert_eq!(error.status(), Some(422));
///
/// let error = ResourceError::from_http_response(500, &json!(null));
/// assert_eq!(error.to_string(), "Server error");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The normalized failure of a request.
    ///
    /// `status` is the HTTP status code when a response was received, and
    /// `None` when the transport failed before one arrived.
    #[error("{message}")]
    Server {
        /// HTTP status of the failed response, if any.
        status: Option<u16>,
        /// The extracted `error` message or the generic fallback.
        message: String,
    },

    /// The operation needs a primary key the record does not have.
    #[error("{resource} has no {key_field}; cannot {operation}")]
    MissingKey {
        /// The type name of the resource.
        resource: &'static str,
        /// The primary-key field name.
        key_field: &'static str,
        /// The operation being attempted (e.g., "update", "delete").
        operation: &'static str,
    },

    /// A query parameter cannot be sent.
    #[error("Invalid query parameter '{key}': {reason}")]
    InvalidQuery {
        /// The offending key (empty when the whole value was rejected).
        key: String,
        /// Why the parameter was rejected.
        reason: String,
    },

    /// The record could not be serialized into a request body.
    #[error("Failed to serialize {resource}: {source}")]
    Encode {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A successful response body did not match the resource type.
    #[error("Failed to parse {resource} response: {source}")]
    Decode {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ResourceError {
    /// Normalizes a non-2xx response.
    #[must_use]
    pub fn from_http_response(code: u16, body: &Value) -> Self {
        Self::Server {
            status: Some(code),
            message: error_message(Some(body)),
        }
    }

    /// Normalizes a transport failure.
    #[must_use]
    pub fn from_transport(error: &TransportError) -> Self {
        Self::Server {
            status: None,
            message: error_message(error.payload()),
        }
    }

    /// Returns the HTTP status of a normalized server failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` for failures reported by the backend or transport,
    /// as opposed to errors raised before a request was sent.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Decode { .. })
    }
}

/// Extracts the message of a structured error payload.
///
/// A non-empty string `error` field is used verbatim; any other non-null
/// `error` value is rendered as JSON. Everything else falls back to
/// [`SERVER_ERROR_MESSAGE`].
#[must_use]
pub fn error_message(payload: Option<&Value>) -> String {
    match payload.and_then(|body| body.get("error")) {
        Some(Value::String(message)) if !message.trim().is_empty() => message.clone(),
        Some(Value::String(_) | Value::Null) | None => SERVER_ERROR_MESSAGE.to_string(),
        Some(other) => other.to_string(),
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_extracts_string_error_field() {
        let body = json!({"error": "Comment not found"});
        assert_eq!(error_message(Some(&body)), "Comment not found");
    }

    #[test]
    fn test_error_message_renders_structured_error_field() {
        let body = json!({"error": {"code": 7, "detail": "quota"}});
        assert_eq!(error_message(Some(&body)), r#"{"code":7,"detail":"quota"}"#);
    }

    #[test]
    fn test_error_message_falls_back_for_missing_or_empty_field() {
        assert_eq!(error_message(None), SERVER_ERROR_MESSAGE);
        assert_eq!(error_message(Some(&json!(null))), SERVER_ERROR_MESSAGE);
        assert_eq!(error_message(Some(&json!({}))), SERVER_ERROR_MESSAGE);
        assert_eq!(
            error_message(Some(&json!({"errors": ["bad"]}))),
            SERVER_ERROR_MESSAGE
        );
        assert_eq!(
            error_message(Some(&json!({"error": ""}))),
            SERVER_ERROR_MESSAGE
        );
        assert_eq!(
            error_message(Some(&json!({"error": null}))),
            SERVER_ERROR_MESSAGE
        );
        assert_eq!(
            error_message(Some(&json!("plain text"))),
            SERVER_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_from_http_response_keeps_status() {
        let error = ResourceError::from_http_response(404, &json!({"error": "Not found"}));

        assert!(matches!(
            error,
            ResourceError::Server { status: Some(404), ref message } if message == "Not found"
        ));
        assert_eq!(error.status(), Some(404));
        assert!(error.is_server_error());
    }

    #[test]
    fn test_from_transport_without_payload_uses_fallback() {
        let error = ResourceError::from_transport(&TransportError::failed("connection refused"));

        assert_eq!(error.to_string(), "Server error");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_from_transport_with_payload_extracts_error() {
        let transport_error = TransportError::Failed {
            message: "proxy rejected request".to_string(),
            payload: Some(json!({"error": "Rate limited"})),
        };

        let error = ResourceError::from_transport(&transport_error);
        assert_eq!(error.to_string(), "Rate limited");
    }

    #[test]
    fn test_missing_key_formats_message() {
        let error = ResourceError::MissingKey {
            resource: "Comment",
            key_field: "id",
            operation: "delete",
        };
        assert_eq!(error.to_string(), "Comment has no id; cannot delete");
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_decode_error_includes_resource() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let error = ResourceError::Decode {
            resource: "Comment",
            source,
        };
        assert!(error.to_string().starts_with("Failed to parse Comment response"));
        assert!(error.is_server_error());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_all_error_variants_implement_std_error() {
        let server: &dyn std::error::Error = &ResourceError::Server {
            status: Some(500),
            message: SERVER_ERROR_MESSAGE.to_string(),
        };
        let _ = server;

        let query: &dyn std::error::Error = &ResourceError::InvalidQuery {
            key: "ids".to_string(),
            reason: "array values cannot be sent".to_string(),
        };
        let _ = query;
    }
}
