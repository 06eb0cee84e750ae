//! Typed resource access over REST.
//!
//! This module provides:
//!
//! - **[`Resource`] trait**: Declares a record type and its primary key
//! - **[`ResourceClient<T>`]**: CRUD operations against one endpoint, with an
//!   optional local collection mirror
//! - **[`Subscription<T>`]**: A stream of full-collection snapshots
//! - **[`QueryParams`]**: Flat query parameters for any operation
//! - **[`ResourceError`]**: The normalized error surface
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resource_client::clients::HttpClient;
//! use resource_client::rest::{QueryParams, Resource, ResourceClient};
//! use resource_client::{BaseUrl, ResourceConfig};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Comment {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     id: Option<u64>,
//!     name: String,
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
//!
//! let config = ResourceConfig::builder()
//!     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com/comments")?)
//!     .cache_enabled(true)
//!     .build()?;
//! let comments = ResourceClient::<Comment>::new(Arc::new(HttpClient::new()?), config);
//!
//! // Filtered list; replaces the local collection
//! let query = QueryParams::new().param("postId", 1);
//! let first_post = comments.list(Some(&query)).await?;
//!
//! // Fetch, edit, and save back
//! let mut comment = comments.get(&1).await?;
//! comment.name = "edited".to_string();
//! let saved = comments.save(&comment).await?;  // PUT /comments/1
//!
//! comments.delete(&saved).await?;
//! ```

mod client;
mod errors;
mod key;
mod path;
mod query;
mod resource;
mod store;

// Public exports
pub use client::ResourceClient;
pub use errors::{error_message, ResourceError, SERVER_ERROR_MESSAGE};
pub use key::{KeyField, KeyKind, PrimaryKey};
pub use path::{collection_url, member_url};
pub use query::QueryParams;
pub use resource::Resource;
pub use store::{ResourceStore, Snapshot, Subscription};
