//! Typed CRUD client for a single REST endpoint.
//!
//! This module provides the [`ResourceClient`] type, which maps application
//! calls onto REST verbs against one base URL:
//!
//! | Operation | Request |
//! |---|---|
//! | `get(id)` | `GET {base}/{id}` |
//! | `list(query)` | `GET {base}?query` |
//! | `create(obj)` | `POST {base}` |
//! | `update(obj)` | `PUT {base}/{key}` |
//! | `delete(obj)` | `DELETE {base}/{key}` |
//! | `save(obj)` | `create` or `update` |
//!
//! With the cache enabled the client also mirrors the last listed
//! collection and emits it to subscribers after each confirmed change.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::{BaseUrl, CreatePolicy, ResourceConfig};
use crate::rest::path::{collection_url, member_url};
use crate::rest::store::{ResourceStore, Subscription};
use crate::rest::{QueryParams, Resource, ResourceError};

/// REST client for one resource type.
///
/// Requests go through the injected [`Transport`]. Failures are normalized
/// into [`ResourceError`]; a failed call never touches the cache, and the
/// client stays usable afterwards.
///
/// # Thread Safety
///
/// `ResourceClient` is `Send + Sync`. Operations take `&self` and may run
/// concurrently; concurrent mutations of the same cached item are applied
/// in completion order, not call order.
///
/// # Cancellation
///
/// Dropping an operation's future before it completes abandons the request
/// and leaves the cache untouched.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use resource_client::clients::HttpClient;
/// use resource_client::rest::ResourceClient;
/// use resource_client::{BaseUrl, ResourceConfig};
///
/// let config = ResourceConfig::builder()
///     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com/comments")?)
///     .cache_enabled(true)
///     .build()?;
///
/// let comments: ResourceClient<Comment> =
///     ResourceClient::new(Arc::new(HttpClient::new()?), config);
///
/// let mut updates = comments.subscribe().expect("cache enabled");
/// let all = comments.list(None).await?;
/// let latest = updates.recv().await;
///
/// let saved = comments.save(&Comment { id: None, name: "hi".into() }).await?;
/// ```
pub struct ResourceClient<T: Resource> {
    transport: Arc<dyn Transport>,
    config: ResourceConfig,
    store: Option<ResourceStore<T>>,
}

impl<T: Resource> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &T::NAME)
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("cached", &self.store.is_some())
            .finish()
    }
}

impl<T: Resource> ResourceClient<T> {
    /// Creates a client bound to `config`'s base URL.
    ///
    /// The local collection is created, empty, when the config enables it.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: ResourceConfig) -> Self {
        let store = config
            .cache_enabled()
            .then(|| ResourceStore::new(config.snapshot_capacity()));

        tracing::debug!(
            resource = T::NAME,
            base_url = %config.base_url(),
            key_field = %T::key_field(),
            cached = store.is_some(),
            "created resource client"
        );

        Self {
            transport,
            config,
            store,
        }
    }

    /// Returns the resource endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.config.base_url()
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Returns `true` if the local collection is maintained.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.store.is_some()
    }

    /// Subscribes to collection snapshots.
    ///
    /// Returns `None` when the cache is disabled. The subscription only sees
    /// snapshots emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> Option<Subscription<T>> {
        self.store.as_ref().map(ResourceStore::subscribe)
    }

    /// Returns the current local collection, or `None` when the cache is
    /// disabled.
    pub async fn cached(&self) -> Option<Vec<T>> {
        match &self.store {
            Some(store) => Some(store.snapshot().await),
            None => None,
        }
    }

    /// Fetches a single record by key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Server`] for failed requests and
    /// [`ResourceError::Decode`] if the body is not a `T`.
    pub async fn get(&self, id: &T::Key) -> Result<T, ResourceError> {
        self.fetch(id, None).await
    }

    /// Fetches a single record by key with extra query parameters.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`ResourceError::InvalidQuery`].
    pub async fn get_with_query(
        &self,
        id: &T::Key,
        query: &QueryParams,
    ) -> Result<T, ResourceError> {
        self.fetch(id, Some(query)).await
    }

    /// Lists records, optionally filtered by query parameters.
    ///
    /// With the cache enabled, a successful list replaces the whole local
    /// collection and emits it once.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidQuery`] before sending if a parameter
    /// is not a scalar, [`ResourceError::Server`] for failed requests and
    /// [`ResourceError::Decode`] if the body is not a list of `T`.
    pub async fn list(&self, query: Option<&QueryParams>) -> Result<Vec<T>, ResourceError> {
        let url = collection_url(self.base_url());
        let response = self.send(HttpMethod::Get, url, None, query).await?;
        let items: Vec<T> = decode(T::NAME, response.body)?;

        if let Some(store) = &self.store {
            store.replace_all(items.clone()).await;
        }

        Ok(items)
    }

    /// Creates a record.
    ///
    /// The record is sent as-is; the server assigns the key. Whether the
    /// local collection changes is governed by [`CreatePolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Encode`] if the record cannot be serialized,
    /// [`ResourceError::Server`] for failed requests and
    /// [`ResourceError::Decode`] if the body is not a `T`.
    pub async fn create(&self, obj: &T) -> Result<T, ResourceError> {
        self.insert(obj, None).await
    }

    /// Creates a record with extra query parameters.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create), plus [`ResourceError::InvalidQuery`].
    pub async fn create_with_query(
        &self,
        obj: &T,
        query: &QueryParams,
    ) -> Result<T, ResourceError> {
        self.insert(obj, Some(query)).await
    }

    /// Updates a record at `{base}/{key}`.
    ///
    /// With the cache enabled, the first cached element with the same key is
    /// replaced by the server's response and one snapshot is emitted. An
    /// element that is not cached is not added.
    ///
    /// Only the key's presence is required; a zero or empty key is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] if the record has no key, plus
    /// the errors of [`create`](Self::create).
    pub async fn update(&self, obj: &T) -> Result<T, ResourceError> {
        self.replace(obj, None).await
    }

    /// Updates a record with extra query parameters.
    ///
    /// # Errors
    ///
    /// As [`update`](Self::update), plus [`ResourceError::InvalidQuery`].
    pub async fn update_with_query(
        &self,
        obj: &T,
        query: &QueryParams,
    ) -> Result<T, ResourceError> {
        self.replace(obj, Some(query)).await
    }

    /// Deletes a record at `{base}/{key}`.
    ///
    /// Returns the echoed record when the server sends one, or `None` for an
    /// empty confirmation. With the cache enabled, the first cached element
    /// with the same key is removed and one snapshot is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] if the record has no key and
    /// [`ResourceError::Server`] for failed requests.
    pub async fn delete(&self, obj: &T) -> Result<Option<T>, ResourceError> {
        self.remove(obj, None).await
    }

    /// Deletes a record with extra query parameters.
    ///
    /// # Errors
    ///
    /// As [`delete`](Self::delete), plus [`ResourceError::InvalidQuery`].
    pub async fn delete_with_query(
        &self,
        obj: &T,
        query: &QueryParams,
    ) -> Result<Option<T>, ResourceError> {
        self.remove(obj, Some(query)).await
    }

    /// Creates or updates a record depending on its key.
    ///
    /// Records whose key is absent, empty, or zero are created; all others
    /// are updated. A record whose valid key is `0` or `""` is therefore
    /// created again. Use [`update`](Self::update) for such records.
    ///
    /// # Errors
    ///
    /// The errors of whichever operation was dispatched.
    pub async fn save(&self, obj: &T) -> Result<T, ResourceError> {
        self.upsert(obj, None).await
    }

    /// Creates or updates a record with extra query parameters.
    ///
    /// # Errors
    ///
    /// The errors of whichever operation was dispatched.
    pub async fn save_with_query(
        &self,
        obj: &T,
        query: &QueryParams,
    ) -> Result<T, ResourceError> {
        self.upsert(obj, Some(query)).await
    }

    async fn fetch(&self, id: &T::Key, query: Option<&QueryParams>) -> Result<T, ResourceError> {
        let url = member_url(self.base_url(), id);
        let response = self.send(HttpMethod::Get, url, None, query).await?;
        decode(T::NAME, response.body)
    }

    async fn insert(&self, obj: &T, query: Option<&QueryParams>) -> Result<T, ResourceError> {
        let body = encode(obj)?;
        let url = collection_url(self.base_url());
        let response = self.send(HttpMethod::Post, url, Some(body), query).await?;
        let created: T = decode(T::NAME, response.body)?;

        if let Some(store) = &self.store {
            match self.config.create_policy() {
                CreatePolicy::Ignore => {}
                CreatePolicy::Append => store.append(created.clone()).await,
            }
        }

        Ok(created)
    }

    async fn replace(&self, obj: &T, query: Option<&QueryParams>) -> Result<T, ResourceError> {
        let key = require_key(obj, "update")?;
        let body = encode(obj)?;
        let url = member_url(self.base_url(), &key);
        let response = self.send(HttpMethod::Put, url, Some(body), query).await?;
        let updated: T = decode(T::NAME, response.body)?;

        if let Some(store) = &self.store {
            store.replace_matching(&key, updated.clone()).await;
        }

        Ok(updated)
    }

    async fn remove(
        &self,
        obj: &T,
        query: Option<&QueryParams>,
    ) -> Result<Option<T>, ResourceError> {
        let key = require_key(obj, "delete")?;
        let url = member_url(self.base_url(), &key);
        let response = self.send(HttpMethod::Delete, url, None, query).await?;

        let echoed = if response.is_empty_body() {
            None
        } else {
            serde_json::from_value(response.body)
                .map_err(|e| {
                    tracing::debug!(
                        resource = T::NAME,
                        error = %e,
                        "delete confirmation is not a record"
                    );
                })
                .ok()
        };

        if let Some(store) = &self.store {
            store.remove_matching(&key).await;
        }

        Ok(echoed)
    }

    async fn upsert(&self, obj: &T, query: Option<&QueryParams>) -> Result<T, ResourceError> {
        if obj.is_new() {
            self.insert(obj, query).await
        } else {
            self.replace(obj, query).await
        }
    }

    /// Builds and sends one request, normalizing every failure.
    async fn send(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<Value>,
        query: Option<&QueryParams>,
    ) -> Result<HttpResponse, ResourceError> {
        let mut builder = HttpRequest::builder(method, url);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        if let Some(query) = query {
            builder = builder.query(query.encode()?);
        }

        let request = builder.build().map_err(|e| {
            self.report(&e);
            ResourceError::Server {
                status: None,
                message: crate::rest::SERVER_ERROR_MESSAGE.to_string(),
            }
        })?;

        tracing::debug!(
            resource = T::NAME,
            method = %request.http_method,
            url = %request.url,
            "sending request"
        );

        let response = self.transport.send(request).await.map_err(|e| {
            self.report(&e);
            ResourceError::from_transport(&e)
        })?;

        if !response.is_ok() {
            self.report(&response.body);
            return Err(ResourceError::from_http_response(
                response.code,
                &response.body,
            ));
        }

        Ok(response)
    }

    /// Logs a raw failure when diagnostic logging is enabled.
    fn report(&self, raw: &dyn fmt::Debug) {
        if self.config.log_errors() {
            tracing::warn!(resource = T::NAME, error = ?raw, "request failed");
        }
    }
}

// Verify ResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check<T: Resource>() {
        assert_send_sync::<ResourceClient<T>>();
    }
};

fn require_key<T: Resource>(obj: &T, operation: &'static str) -> Result<T::Key, ResourceError> {
    obj.primary_key().ok_or(ResourceError::MissingKey {
        resource: T::NAME,
        key_field: T::KEY_FIELD,
        operation,
    })
}

fn encode<T: Resource>(obj: &T) -> Result<Value, ResourceError> {
    serde_json::to_value(obj).map_err(|source| ResourceError::Encode {
        resource: T::NAME,
        source,
    })
}

fn decode<R: DeserializeOwned>(resource: &'static str, body: Value) -> Result<R, ResourceError> {
    serde_json::from_value(body).map_err(|source| ResourceError::Decode { resource, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::TransportError;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct MockComment {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        name: String,
    }

    impl Resource for MockComment {
        type Key = u64;
        const NAME: &'static str = "Comment";

        fn primary_key(&self) -> Option<Self::Key> {
            self.id
        }
    }

    #[derive(Debug, Default)]
    struct Recorder {
        requests: Mutex<Vec<HttpRequest>>,
        response: Mutex<Option<HttpResponse>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.response
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| TransportError::failed("no response scripted"))
        }
    }

    fn client(recorder: &Arc<Recorder>) -> ResourceClient<MockComment> {
        let config =
            ResourceConfig::new(BaseUrl::new("https://api.example.com/comments").unwrap());
        ResourceClient::new(recorder.clone(), config)
    }

    #[tokio::test]
    async fn test_stateless_client_has_no_subscription() {
        let recorder = Arc::new(Recorder::default());
        let client = client(&recorder);

        assert!(!client.is_cached());
        assert!(client.subscribe().is_none());
        assert!(client.cached().await.is_none());
    }

    #[tokio::test]
    async fn test_update_without_key_fails_before_sending() {
        let recorder = Arc::new(Recorder::default());
        let client = client(&recorder);

        let result = client
            .update(&MockComment {
                id: None,
                name: "x".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(ResourceError::MissingKey {
                operation: "update",
                key_field: "id",
                ..
            })
        ));
        assert!(recorder.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_query_fails_before_sending() {
        let recorder = Arc::new(Recorder::default());
        let client = client(&recorder);
        let query = QueryParams::new().param("ids", json!([1, 2]));

        let result = client.list(Some(&query)).await;

        assert!(matches!(result, Err(ResourceError::InvalidQuery { .. })));
        assert!(recorder.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_reports_decode_error() {
        let recorder = Arc::new(Recorder::default());
        *recorder.response.lock().unwrap() =
            Some(HttpResponse::new(200, json!({"unexpected": true})));
        let client = client(&recorder);

        let result = client.get(&1).await;

        assert!(matches!(result, Err(ResourceError::Decode { .. })));
    }

    #[test]
    fn test_debug_output_names_resource() {
        let recorder = Arc::new(Recorder::default());
        let client = client(&recorder);

        let debug = format!("{client:?}");
        assert!(debug.contains("ResourceClient"));
        assert!(debug.contains("Comment"));
    }
}
