//! reqwest-backed [`Transport`] implementation.
//!
//! This module provides the [`HttpClient`] type, the default transport for
//! talking to a real REST backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport built on reqwest.
///
/// The client handles:
/// - Default headers including User-Agent and `Accept: application/json`
/// - JSON request bodies and query strings
/// - Response body parsing into [`serde_json::Value`]
///
/// It performs exactly one attempt per request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; share one instance between resource clients
/// through an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use resource_client::clients::HttpClient;
///
/// let transport = Arc::new(HttpClient::new()?);
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the underlying reqwest
    /// client cannot be created (e.g., TLS initialization failure).
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Creates a new builder for constructing an `HttpClient`.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Parses a raw response body into JSON.
    ///
    /// Empty bodies become `null`. Bodies that are not JSON are kept as
    /// `{"raw_body": ...}` for 5xx responses and dropped otherwise.
    fn parse_body(code: u16, body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::Value::Null;
        }

        serde_json::from_str(body_text).unwrap_or_else(|_| {
            if code >= 500 {
                serde_json::json!({ "raw_body": body_text })
            } else {
                serde_json::Value::Null
            }
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        request.verify()?;

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let body_text = res.text().await?;
        let body = Self::parse_body(code, &body_text);

        Ok(HttpResponse::new(code, body))
    }
}

/// Builder for constructing [`HttpClient`] instances.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use resource_client::clients::HttpClient;
///
/// let client = HttpClient::builder()
///     .user_agent_prefix("MyApp/1.0")
///     .header("X-Api-Key", "secret")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert!(client.default_headers()["User-Agent"].starts_with("MyApp/1.0 | "));
/// ```
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    user_agent_prefix: Option<String>,
    extra_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Sets a total timeout for each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if an extra header is not a
    /// valid HTTP header, or [`ConfigError::HttpClientBuild`] if reqwest
    /// fails to initialize.
    pub fn build(self) -> Result<HttpClient, ConfigError> {
        let user_agent_prefix = self
            .user_agent_prefix
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}resource-client v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        for (key, value) in self.extra_headers {
            reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ConfigError::InvalidHeader {
                    name: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            reqwest::header::HeaderValue::from_str(&value).map_err(|e| {
                ConfigError::InvalidHeader {
                    name: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            default_headers.insert(key, value);
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClientBuild {
            reason: e.to_string(),
        })?;

        Ok(HttpClient {
            client,
            default_headers,
        })
    }
}
