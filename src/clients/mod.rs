//! The Transport seam between resource clients and the network.
//!
//! Resource clients never talk to the network directly. They build an
//! [`HttpRequest`], hand it to a [`Transport`], and interpret the
//! [`HttpResponse`] that comes back.
//!
//! # Overview
//!
//! - [`Transport`]: The capability resource clients consume
//! - [`HttpClient`]: The default reqwest-backed transport
//! - [`HttpRequest`]: A request to be sent (method, URL, JSON body, query)
//! - [`HttpResponse`]: Status code and parsed JSON body
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`TransportError`]: The exchange itself failed
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_client::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let client = HttpClient::new()?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "https://api.example.com/comments")
//!     .query_param("postId", "1")
//!     .build()?;
//!
//! let response = client.send(request).await?;
//! ```
//!
//! # Custom Transports
//!
//! Anything that can execute an [`HttpRequest`] can back a resource client,
//! such as an authenticating wrapper, a retrying wrapper, or an in-memory
//! fake in tests. Implement [`Transport`] and pass it as
//! `Arc<dyn Transport>`.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{InvalidHttpRequestError, TransportError};
pub use http_client::{HttpClient, HttpClientBuilder, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
