//! Transport-level error types.
//!
//! These errors describe a failed exchange with the backend. They stop at the
//! resource layer, which normalizes them into
//! [`ResourceError`](crate::rest::ResourceError) before returning to callers.
//!
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`TransportError`]: The exchange itself failed (network, transport-specific)
//!
//! A non-2xx response is not a `TransportError`; transports return it as a
//! regular [`HttpResponse`](crate::clients::HttpResponse).

use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use resource_client::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request URL is empty.
    #[error("Cannot send a request without a URL.")]
    MissingUrl,
}

/// Error returned when a [`Transport`](crate::clients::Transport) could not
/// complete an exchange.
///
/// # Example
///
/// ```rust
/// use resource_client::clients::TransportError;
/// use serde_json::json;
///
/// let error = TransportError::Failed {
///     message: "connection reset".to_string(),
///     payload: Some(json!({"error": "Upstream unavailable"})),
/// };
/// assert_eq!(error.to_string(), "connection reset");
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error from the reqwest transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A failure reported by a custom transport.
    ///
    /// `payload` carries any structured error body the transport received.
    #[error("{message}")]
    Failed {
        /// Human readable description of the failure.
        message: String,
        /// Structured error body, if one was available.
        payload: Option<serde_json::Value>,
    },
}

impl TransportError {
    /// Creates a [`TransportError::Failed`] without a payload.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            payload: None,
        }
    }

    /// Returns the structured error body carried by this failure, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Failed { payload, .. } => payload.as_ref(),
            Self::Network(_) | Self::InvalidRequest(_) => None,
        }
    }
}
