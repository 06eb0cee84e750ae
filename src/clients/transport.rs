//! The capability resource clients use to reach the backend.

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Executes HTTP requests on behalf of a resource client.
///
/// A transport owns connection handling, serialization on the wire,
/// authentication, retries and timeouts. Resource clients only build
/// requests and interpret responses.
///
/// Implementations return `Ok` for every response received, including
/// non-2xx ones. `Err` is reserved for exchanges that did not produce a
/// response at all.
///
/// Dropping the returned future abandons the request. Transports that can
/// cancel in-flight work should do so on drop.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_client::clients::{HttpRequest, HttpResponse, Transport, TransportError};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct Echo;
///
/// #[async_trait]
/// impl Transport for Echo {
///     async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(200, request.body.unwrap_or(json!(null))))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
