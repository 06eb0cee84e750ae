//! Error types for client configuration.
//!
//! This module contains the error type returned when building a
//! [`ResourceConfig`](crate::ResourceConfig), a [`BaseUrl`](crate::BaseUrl),
//! or the reqwest-backed [`HttpClient`](crate::clients::HttpClient).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use resource_client::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com/comments').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Snapshot channel capacity must be between one and the configured maximum.
    #[error("Invalid snapshot capacity {capacity}. Expected between 1 and {max}.", max = crate::config::MAX_SNAPSHOT_CAPACITY)]
    InvalidSnapshotCapacity {
        /// The capacity that was provided.
        capacity: usize,
    },

    /// A default header could not be used.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name that was provided.
        name: String,
        /// Why the header was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClientBuild {
        /// The reason reported by the HTTP library.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "comments".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'comments'"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_snapshot_capacity_error_message() {
        let error = ConfigError::InvalidSnapshotCapacity { capacity: 0 };
        assert!(error.to_string().contains("capacity 0"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let _: &dyn std::error::Error = &error;
    }
}
