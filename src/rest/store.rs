//! Local collection mirror and snapshot notifications.
//!
//! A [`ResourceStore`] holds the last known list of a resource type and
//! broadcasts the whole collection to subscribers after every change. It is
//! only ever mutated with server-confirmed data; nothing is applied
//! optimistically.
//!
//! # Subscription Semantics
//!
//! - Every subscriber receives every snapshot emitted after it subscribed
//! - Late subscribers see no history; read [`ResourceStore::snapshot`] for
//!   the current state
//! - A subscriber that falls more than `capacity` snapshots behind skips
//!   ahead to the newest ones it can still receive

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::config::MAX_SNAPSHOT_CAPACITY;
use crate::rest::resource::Resource;

/// The full collection as emitted to subscribers.
pub type Snapshot<T> = Arc<Vec<T>>;

/// In-memory mirror of a resource collection with change notifications.
#[derive(Debug)]
pub struct ResourceStore<T: Resource> {
    items: RwLock<Vec<T>>,
    sender: broadcast::Sender<Snapshot<T>>,
}

impl<T: Resource> ResourceStore<T> {
    /// Creates an empty store buffering up to `capacity` snapshots per
    /// subscriber.
    ///
    /// `capacity` is clamped to `1..=MAX_SNAPSHOT_CAPACITY`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_SNAPSHOT_CAPACITY));
        Self {
            items: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Returns a listener for future snapshots.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns a copy of the current collection.
    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    /// Returns the number of cached items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Replaces the whole collection and emits it.
    pub async fn replace_all(&self, items: Vec<T>) {
        let mut guard = self.items.write().await;
        *guard = items;
        tracing::debug!(resource = T::NAME, len = guard.len(), "replaced cached collection");
        self.emit(&guard);
    }

    /// Replaces the first element whose key matches `item`'s key.
    ///
    /// Emits and returns `true` if an element was replaced. An item that is
    /// not cached is not added.
    pub async fn replace_matching(&self, key: &T::Key, item: T) -> bool {
        let mut guard = self.items.write().await;
        let Some(slot) = guard.iter_mut().find(|cached| cached.has_key(key)) else {
            tracing::debug!(
                resource = T::NAME,
                key = %key,
                "updated item is not cached; collection unchanged"
            );
            return false;
        };

        *slot = item;
        tracing::debug!(resource = T::NAME, key = %key, "replaced cached item");
        self.emit(&guard);
        true
    }

    /// Removes the first element with `key`, preserving the order of the rest.
    ///
    /// Emits and returns `true` if an element was removed.
    pub async fn remove_matching(&self, key: &T::Key) -> bool {
        let mut guard = self.items.write().await;
        let Some(index) = guard.iter().position(|cached| cached.has_key(key)) else {
            tracing::debug!(
                resource = T::NAME,
                key = %key,
                "deleted item is not cached; collection unchanged"
            );
            return false;
        };

        guard.remove(index);
        tracing::debug!(resource = T::NAME, key = %key, "removed cached item");
        self.emit(&guard);
        true
    }

    /// Appends an item to the end of the collection and emits.
    pub async fn append(&self, item: T) {
        let mut guard = self.items.write().await;
        guard.push(item);
        tracing::debug!(resource = T::NAME, len = guard.len(), "appended cached item");
        self.emit(&guard);
    }

    /// Sends the collection to subscribers.
    ///
    /// Called with the write lock held so emission order matches mutation order.
    fn emit(&self, items: &[T]) {
        let snapshot: Snapshot<T> = Arc::new(items.to_vec());
        if self.sender.send(snapshot).is_err() {
            tracing::trace!(resource = T::NAME, "no subscribers for snapshot");
        }
    }
}

/// A listener for collection snapshots.
///
/// Obtained from [`ResourceClient::subscribe`](crate::rest::ResourceClient::subscribe).
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription<T: Resource> {
    receiver: broadcast::Receiver<Snapshot<T>>,
}

impl<T: Resource> Subscription<T> {
    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the client that owns the store has been dropped
    /// and every pending snapshot has been received.
    pub async fn recv(&mut self) -> Option<Snapshot<T>> {
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        resource = T::NAME,
                        skipped,
                        "snapshot subscriber lagged; skipping to newer snapshots"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next pending snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<Snapshot<T>> {
        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        resource = T::NAME,
                        skipped,
                        "snapshot subscriber lagged; skipping to newer snapshots"
                    );
                }
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return None,
            }
        }
    }

    /// Discards pending snapshots and returns how many were dropped.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.try_recv().is_some() {
            drained += 1;
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: Option<u64>,
        v: String,
    }

    impl Resource for Item {
        type Key = u64;
        const NAME: &'static str = "Item";

        fn primary_key(&self) -> Option<Self::Key> {
            self.id
        }
    }

    fn item(id: u64, v: &str) -> Item {
        Item {
            id: Some(id),
            v: v.to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store: ResourceStore<Item> = ResourceStore::new(4);
        assert!(store.is_empty().await);
        assert_eq!(store.len().await, 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_capacity_is_clamped() {
        let store = ResourceStore::new(0);
        let mut sub = store.subscribe();
        store.append(item(1, "a")).await;
        assert_eq!(sub.drain(), 1);

        let store: ResourceStore<Item> = ResourceStore::new(usize::MAX);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_replace_all_emits_full_collection() {
        let store = ResourceStore::new(4);
        let mut sub = store.subscribe();

        store.replace_all(vec![item(1, "a"), item(2, "b")]).await;

        let snapshot = sub.try_recv().unwrap();
        assert_eq!(*snapshot, vec![item(1, "a"), item(2, "b")]);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_replace_matching_preserves_index() {
        let store = ResourceStore::new(4);
        store
            .replace_all(vec![item(1, "a"), item(2, "b"), item(3, "c")])
            .await;
        let mut sub = store.subscribe();

        assert!(store.replace_matching(&2, item(2, "B")).await);

        assert_eq!(
            store.snapshot().await,
            vec![item(1, "a"), item(2, "B"), item(3, "c")]
        );
        assert_eq!(sub.drain(), 1);
    }

    #[tokio::test]
    async fn test_replace_matching_only_first_duplicate() {
        let store = ResourceStore::new(4);
        store.replace_all(vec![item(1, "a"), item(1, "b")]).await;

        assert!(store.replace_matching(&1, item(1, "z")).await);
        assert_eq!(store.snapshot().await, vec![item(1, "z"), item(1, "b")]);
    }

    #[tokio::test]
    async fn test_replace_matching_miss_does_not_insert_or_emit() {
        let store = ResourceStore::new(4);
        store.replace_all(vec![item(1, "x")]).await;
        let mut sub = store.subscribe();

        assert!(!store.replace_matching(&99, item(99, "z")).await);

        assert_eq!(store.snapshot().await, vec![item(1, "x")]);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_remove_matching_keeps_order() {
        let store = ResourceStore::new(4);
        store
            .replace_all(vec![item(1, "a"), item(2, "b"), item(3, "c")])
            .await;
        let mut sub = store.subscribe();

        assert!(store.remove_matching(&2).await);
        assert!(!store.remove_matching(&2).await);

        assert_eq!(store.snapshot().await, vec![item(1, "a"), item(3, "c")]);
        assert_eq!(sub.drain(), 1);
    }

    #[tokio::test]
    async fn test_append_emits() {
        let store = ResourceStore::new(4);
        let mut sub = store.subscribe();

        store.append(item(7, "new")).await;

        assert_eq!(*sub.try_recv().unwrap(), vec![item(7, "new")]);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_no_history() {
        let store = ResourceStore::new(4);
        store.replace_all(vec![item(1, "a")]).await;

        let mut late = store.subscribe();
        assert!(late.try_recv().is_none());

        store.append(item(2, "b")).await;
        assert_eq!(*late.try_recv().unwrap(), vec![item(1, "a"), item(2, "b")]);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_receive_snapshot() {
        let store = ResourceStore::new(4);
        let mut first = store.subscribe();
        let mut second = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        store.replace_all(vec![item(1, "a")]).await;

        assert_eq!(*first.try_recv().unwrap(), vec![item(1, "a")]);
        assert_eq!(*second.try_recv().unwrap(), vec![item(1, "a")]);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_to_newest() {
        let store = ResourceStore::new(2);
        let mut sub = store.subscribe();

        for id in 1..=5 {
            store.append(item(id, "x")).await;
        }

        // Only the newest two snapshots survive
        assert_eq!(sub.try_recv().unwrap().len(), 4);
        assert_eq!(sub.try_recv().unwrap().len(), 5);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_recv_returns_none_after_store_dropped() {
        let store = ResourceStore::new(4);
        let mut sub = store.subscribe();
        store.append(item(1, "a")).await;
        drop(store);

        assert_eq!(*sub.recv().await.unwrap(), vec![item(1, "a")]);
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dropping_subscription_unsubscribes() {
        let store: ResourceStore<Item> = ResourceStore::new(4);
        let sub = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
    }
}
