//! # Resource Client
//!
//! A typed client for JSON REST resources, with an optional local mirror of
//! the collection that notifies subscribers after every confirmed change.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ResourceConfig`] and [`ResourceConfigBuilder`]
//! - A validated [`BaseUrl`] newtype for the resource endpoint
//! - The [`Resource`] trait for declaring a record type and its primary key
//! - [`ResourceClient`] for `get`, `list`, `create`, `update`, `delete`, and `save`
//! - Snapshot subscriptions when the cache is enabled
//! - A pluggable [`Transport`] seam, with a reqwest-backed [`HttpClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_client::{BaseUrl, CreatePolicy, ResourceConfig};
//!
//! let config = ResourceConfig::builder()
//!     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com/comments").unwrap())
//!     .cache_enabled(true)
//!     .create_policy(CreatePolicy::Append)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.cache_enabled());
//! assert_eq!(config.base_url().as_ref(), "https://jsonplaceholder.typicode.com/comments");
//! ```
//!
//! ## Defining a Resource
//!
//! ```rust
//! use resource_client::Resource;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Comment {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     id: Option<u64>,
//!     #[serde(rename = "postId")]
//!     post_id: u64,
//!     name: String,
//!     email: String,
//!     body: String,
//! }
//!
//! impl Resource for Comment {
//!     type Key = u64;
//!     const NAME: &'static str = "Comment";
//!
//!     fn primary_key(&self) -> Option<u64> {
//!         self.id
//!     }
//! }
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resource_client::{HttpClient, ResourceClient};
//!
//! let comments: ResourceClient<Comment> =
//!     ResourceClient::new(Arc::new(HttpClient::new()?), config);
//!
//! let mut updates = comments.subscribe().expect("cache enabled");
//!
//! comments.list(None).await?;
//! let snapshot = updates.recv().await;
//!
//! let mut first = comments.get(&1).await?;
//! first.name = "renamed".to_string();
//! comments.save(&first).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and builders validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Server-confirmed cache**: The local collection only changes after success

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, CreatePolicy, ResourceConfig, ResourceConfigBuilder};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    HttpClient, HttpClientBuilder, HttpMethod, HttpRequest, HttpResponse, Transport,
    TransportError,
};

// Re-export resource types
pub use rest::{QueryParams, Resource, ResourceClient, ResourceError, Snapshot, Subscription};
