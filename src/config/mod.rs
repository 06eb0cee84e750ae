//! Configuration types for resource clients.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ResourceConfig`]: The settings bound to one resource client
//! - [`ResourceConfigBuilder`]: A builder for constructing [`ResourceConfig`] instances
//! - [`BaseUrl`]: A validated resource endpoint
//! - [`CreatePolicy`]: Whether `create` updates the local collection
//!
//! # Example
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
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use crate::error::ConfigError;

/// Default number of snapshots buffered per subscriber.
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 16;

/// Largest accepted number of snapshots buffered per subscriber.
pub const MAX_SNAPSHOT_CAPACITY: usize = 4096;

/// How a successful `create` interacts with the local collection.
///
/// Only meaningful when the cache is enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CreatePolicy {
    /// Leave the collection untouched and emit nothing. Newly created items
    /// appear in the cache after the next `list`.
    #[default]
    Ignore,
    /// Push the server-confirmed item onto the end of the collection and emit.
    Append,
}

/// Configuration for a single resource client.
///
/// # Thread Safety
///
/// `ResourceConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use resource_client::{BaseUrl, ResourceConfig};
///
/// let config = ResourceConfig::new(BaseUrl::new("https://api.example.com/users").unwrap());
/// assert!(!config.cache_enabled());
/// assert_eq!(config.base_url().as_ref(), "https://api.example.com/users");
/// ```
#[derive(Clone, Debug)]
pub struct ResourceConfig {
    base_url: BaseUrl,
    cache_enabled: bool,
    create_policy: CreatePolicy,
    snapshot_capacity: usize,
    log_errors: bool,
}

impl ResourceConfig {
    /// Creates a stateless configuration with default settings.
    #[must_use]
    pub const fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            cache_enabled: false,
            create_policy: CreatePolicy::Ignore,
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
            log_errors: false,
        }
    }

    /// Creates a new builder for constructing a `ResourceConfig`.
    #[must_use]
    pub fn builder() -> ResourceConfigBuilder {
        ResourceConfigBuilder::new()
    }

    /// Returns the resource endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns whether the local collection and notifications are enabled.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns how `create` interacts with the local collection.
    #[must_use]
    pub const fn create_policy(&self) -> CreatePolicy {
        self.create_policy
    }

    /// Returns the number of snapshots buffered per subscriber.
    #[must_use]
    pub const fn snapshot_capacity(&self) -> usize {
        self.snapshot_capacity
    }

    /// Returns whether raw failures are logged before normalization.
    #[must_use]
    pub const fn log_errors(&self) -> bool {
        self.log_errors
    }
}

// Verify ResourceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceConfig>();
};

/// Builder for constructing [`ResourceConfig`] instances.
///
/// `base_url` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `cache_enabled`: `false`
/// - `create_policy`: [`CreatePolicy::Ignore`]
/// - `snapshot_capacity`: [`DEFAULT_SNAPSHOT_CAPACITY`]
/// - `log_errors`: `false`
#[derive(Debug, Default)]
pub struct ResourceConfigBuilder {
    base_url: Option<BaseUrl>,
    cache_enabled: Option<bool>,
    create_policy: Option<CreatePolicy>,
    snapshot_capacity: Option<usize>,
    log_errors: Option<bool>,
}

impl ResourceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource endpoint (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Enables the local collection and snapshot notifications.
    #[must_use]
    pub const fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Sets how `create` interacts with the local collection.
    #[must_use]
    pub const fn create_policy(mut self, policy: CreatePolicy) -> Self {
        self.create_policy = Some(policy);
        self
    }

    /// Sets the number of snapshots buffered per subscriber.
    ///
    /// A subscriber that falls further behind skips ahead to newer snapshots.
    #[must_use]
    pub const fn snapshot_capacity(mut self, capacity: usize) -> Self {
        self.snapshot_capacity = Some(capacity);
        self
    }

    /// Logs each raw failure at `warn` level before it is normalized.
    #[must_use]
    pub const fn log_errors(mut self, enabled: bool) -> Self {
        self.log_errors = Some(enabled);
        self
    }

    /// Builds the [`ResourceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    /// Returns [`ConfigError::InvalidSnapshotCapacity`] if the capacity is zero
    /// or above [`MAX_SNAPSHOT_CAPACITY`].
    pub fn build(self) -> Result<ResourceConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let snapshot_capacity = self.snapshot_capacity.unwrap_or(DEFAULT_SNAPSHOT_CAPACITY);
        if !(1..=MAX_SNAPSHOT_CAPACITY).contains(&snapshot_capacity) {
            return Err(ConfigError::InvalidSnapshotCapacity {
                capacity: snapshot_capacity,
            });
        }

        Ok(ResourceConfig {
            base_url,
            cache_enabled: self.cache_enabled.unwrap_or(false),
            create_policy: self.create_policy.unwrap_or_default(),
            snapshot_capacity,
            log_errors: self.log_errors.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> BaseUrl {
        BaseUrl::new("https://api.example.com/comments").unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ResourceConfigBuilder::new().cache_enabled(true).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ResourceConfig::builder().base_url(base_url()).build().unwrap();

        assert!(!config.cache_enabled());
        assert_eq!(config.create_policy(), CreatePolicy::Ignore);
        assert_eq!(config.snapshot_capacity(), DEFAULT_SNAPSHOT_CAPACITY);
        assert!(!config.log_errors());
    }

    #[test]
    fn test_new_matches_builder_defaults() {
        let config = ResourceConfig::new(base_url());

        assert_eq!(config.base_url(), &base_url());
        assert!(!config.cache_enabled());
        assert_eq!(config.create_policy(), CreatePolicy::Ignore);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ResourceConfig::builder()
            .base_url(base_url())
            .cache_enabled(true)
            .create_policy(CreatePolicy::Append)
            .snapshot_capacity(4)
            .log_errors(true)
            .build()
            .unwrap();

        assert!(config.cache_enabled());
        assert_eq!(config.create_policy(), CreatePolicy::Append);
        assert_eq!(config.snapshot_capacity(), 4);
        assert!(config.log_errors());
    }

    #[test]
    fn test_builder_rejects_zero_snapshot_capacity() {
        let result = ResourceConfig::builder()
            .base_url(base_url())
            .snapshot_capacity(0)
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidSnapshotCapacity { capacity: 0 }
        );
    }

    #[test]
    fn test_builder_rejects_oversized_snapshot_capacity() {
        let result = ResourceConfig::builder()
            .base_url(base_url())
            .cache_enabled(true)
            .snapshot_capacity(usize::MAX)
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidSnapshotCapacity {
                capacity: usize::MAX
            }
        );
    }

    #[test]
    fn test_builder_accepts_max_snapshot_capacity() {
        let config = ResourceConfig::builder()
            .base_url(base_url())
            .snapshot_capacity(MAX_SNAPSHOT_CAPACITY)
            .build()
            .unwrap();

        assert_eq!(config.snapshot_capacity(), MAX_SNAPSHOT_CAPACITY);

        let result = ResourceConfig::builder()
            .base_url(base_url())
            .snapshot_capacity(MAX_SNAPSHOT_CAPACITY + 1)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSnapshotCapacity { .. })
        ));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResourceConfig>();
    }
}
