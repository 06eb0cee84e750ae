//! The [`Resource`] trait, the structural bound of every resource client.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives
//! 2. Make the primary-key field optional so new records can omit it
//! 3. Implement `Resource`, pointing `primary_key` at that field
//!
//! # Example
//!
//! ```rust
//! use resource_client::rest::Resource;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Comment {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub id: Option<u64>,
//!     pub name: String,
//! }
//!
//! impl Resource for Comment {
//!     type Key = u64;
//!     const NAME: &'static str = "Comment";
//!
//!     fn primary_key(&self) -> Option<Self::Key> {
//!         self.id
//!     }
//! }
//!
//! let draft = Comment { id: None, name: "first".to_string() };
//! assert!(draft.is_new());
//! ```
//!
//! A document store keyed by `_id`:
//!
//! ```rust
//! use resource_client::rest::{KeyKind, Resource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Note {
//!     #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
//!     pub id: Option<String>,
//!     pub text: String,
//! }
//!
//! impl Resource for Note {
//!     type Key = String;
//!     const NAME: &'static str = "Note";
//!     const KEY_FIELD: &'static str = "_id";
//!
//!     fn primary_key(&self) -> Option<Self::Key> {
//!         self.id.clone()
//!     }
//! }
//!
//! assert_eq!(Note::key_field().name, "_id");
//! assert_eq!(Note::key_field().kind, KeyKind::Text);
//! ```

use serde::{de::DeserializeOwned, Serialize};

use crate::rest::key::{KeyField, PrimaryKey};

/// A record exposed through a single REST endpoint.
///
/// Resources must be serializable, deserializable, cloneable, and
/// thread-safe. Identity is carried by one primary-key field.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The type of the primary-key field.
    type Key: PrimaryKey;

    /// The singular name of the resource (e.g., "Comment").
    ///
    /// Used in error messages and logs.
    const NAME: &'static str;

    /// The JSON name of the primary-key field.
    const KEY_FIELD: &'static str = "id";

    /// Returns the primary-key value, or `None` if the field is absent.
    fn primary_key(&self) -> Option<Self::Key>;

    /// Returns the declared primary-key descriptor.
    #[must_use]
    fn key_field() -> KeyField {
        KeyField::new(Self::KEY_FIELD, <Self::Key as PrimaryKey>::KIND)
    }

    /// Returns `true` when `save` would create this record.
    ///
    /// A record is new when its key is absent, empty, or zero.
    fn is_new(&self) -> bool {
        self.primary_key().map_or(true, |key| !key.is_assigned())
    }

    /// Returns `true` if this record's key equals `key`.
    fn has_key(&self, key: &Self::Key) -> bool {
        self.primary_key().as_ref() == Some(key)
    }
}
