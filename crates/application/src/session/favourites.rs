//! Favourited entity ids for the current session.

use std::collections::HashSet;
use std::sync::Arc;

use holocron_domain::EntityId;
use tokio::sync::RwLock;

/// Thread-safe set of favourited entity ids.
///
/// Entries are [`EntityId`]s, so the set can never hold an empty id, and
/// set semantics rule out duplicates.
#[derive(Debug, Clone, Default)]
pub struct FavouritesStore {
    ids: Arc<RwLock<HashSet<EntityId>>>,
}

impl FavouritesStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`. Returns false if it was already present.
    pub async fn add(&self, id: EntityId) -> bool {
        self.ids.write().await.insert(id)
    }

    /// Remove `id`. Returns false if it was not present.
    pub async fn remove(&self, id: &EntityId) -> bool {
        self.ids.write().await.remove(id)
    }

    /// Remove every id.
    pub async fn clear(&self) {
        self.ids.write().await.clear();
    }

    /// Membership test.
    pub async fn contains(&self, id: &EntityId) -> bool {
        self.ids.read().await.contains(id)
    }

    /// Number of favourites.
    pub async fn len(&self) -> usize {
        self.ids.read().await.len()
    }

    /// Whether the set is empty.
    pub async fn is_empty(&self) -> bool {
        self.ids.read().await.is_empty()
    }

    /// Copy of the current ids, sorted for stable display.
    pub async fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.ids.read().await.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Copy of the current set, for filtering without holding the lock.
    pub async fn snapshot(&self) -> HashSet<EntityId> {
        self.ids.read().await.clone()
    }
}
