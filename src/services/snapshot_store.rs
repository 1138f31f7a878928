//! Holder of the latest published snapshot.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::models::{EnrichedRepository, Snapshot};

/// Process-wide handle to the current [`Snapshot`].
///
/// Readers take a cheap `Arc` clone and keep a consistent view for as long
/// as they hold it; publishing swaps the `Arc` in one assignment, so a
/// reader sees either the previous complete snapshot or the new one.
/// Cloning the store shares the same slot.
#[derive(Clone, Default)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotStore {
    /// Create a store holding an empty, never-refreshed snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Replace the current snapshot with a freshly published list.
    pub async fn publish(&self, repositories: Vec<EnrichedRepository>) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::published(repositories));
        *self.current.write().await = snapshot.clone();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = SnapshotStore::new();
        let snapshot = store.current().await;
        assert!(snapshot.is_empty());
        assert!(snapshot.refreshed_at.is_none());
    }

    #[tokio::test]
    async fn test_publish_replaces_without_touching_held_views() {
        let store = SnapshotStore::new();
        let before = store.current().await;

        let published = store.publish(Vec::new()).await;
        let after = store.current().await;

        assert!(before.refreshed_at.is_none());
        assert!(after.refreshed_at.is_some());
        assert!(Arc::ptr_eq(&published, &after));
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let store = SnapshotStore::new();
        let reader = store.clone();
        store.publish(Vec::new()).await;
        assert!(reader.current().await.refreshed_at.is_some());
    }
}
