//! Favorites store.
//!
//! Holds the set of favorited site ids and mirrors it to the key-value store
//! under [`FAVORITES_KEY`]. Persistence is advisory: failures are logged and
//! the in-memory set stays at its last persisted value.

use sanskriti_core::catalog::HeritageSite;
use sanskriti_core::favorites::FavoriteSet;
use sanskriti_core::storage::{FAVORITES_KEY, KeyValueStore};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    favorites: watch::Sender<FavoriteSet>,
    /// Serializes read-modify-write cycles so no toggle is lost.
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    /// Loads the persisted set. An absent, unreadable or corrupt entry yields
    /// an empty set.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let favorites = match storage.get(FAVORITES_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<FavoriteSet>(&raw).unwrap_or_else(|e| {
                tracing::warn!("[FavoritesStore] Discarding corrupt favorites: {}", e);
                FavoriteSet::new()
            }),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                tracing::error!("[FavoritesStore] Error loading favorites: {}", e);
                FavoriteSet::new()
            }
        };

        tracing::debug!("[FavoritesStore] Loaded {} favorites", favorites.len());
        let (favorites, _) = watch::channel(favorites);
        Self {
            storage,
            favorites,
            write_lock: Mutex::new(()),
        }
    }

    pub fn is_favorite(&self, site_id: &str) -> bool {
        self.favorites.borrow().contains(site_id)
    }

    /// Snapshot of the current set.
    pub fn favorites(&self) -> FavoriteSet {
        self.favorites.borrow().clone()
    }

    /// Registers an observer. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.favorites.subscribe()
    }

    /// Flips membership of `site_id` and returns whether it is now a favorite.
    ///
    /// When the write fails nothing changes and the previous membership is
    /// returned.
    pub async fn toggle_favorite(&self, site_id: &str) -> bool {
        let _guard = self.write_lock.lock().await;

        let next = self.favorites.borrow().toggled(site_id);
        let now_favorite = next.contains(site_id);
        if self.commit(next).await {
            now_favorite
        } else {
            !now_favorite
        }
    }

    /// The sites of `catalog` that are favorites, in catalog order.
    pub fn favorite_sites<'a>(&self, catalog: &'a [HeritageSite]) -> Vec<&'a HeritageSite> {
        self.favorites
            .borrow()
            .project(catalog, |site| site.id.as_str())
    }

    pub async fn clear_favorites(&self) {
        let _guard = self.write_lock.lock().await;
        self.commit(FavoriteSet::new()).await;
    }

    /// Persists `next`, then publishes it. Returns false if the write failed.
    async fn commit(&self, next: FavoriteSet) -> bool {
        let raw = match serde_json::to_string(&next) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("[FavoritesStore] Error encoding favorites: {}", e);
                return false;
            }
        };

        if let Err(e) = self.storage.set(FAVORITES_KEY, &raw).await {
            tracing::error!("[FavoritesStore] Error saving favorites: {}", e);
            return false;
        }

        self.favorites.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FlakyStore;
    use sanskriti_infrastructure::InMemoryKeyValueStore;
    use sanskriti_infrastructure::catalog::builtin_sites;

    async fn store_with(raw: Option<&str>) -> (Arc<FlakyStore>, FavoritesStore) {
        let inner = match raw {
            Some(raw) => InMemoryKeyValueStore::with_entries([(FAVORITES_KEY, raw)]),
            None => InMemoryKeyValueStore::new(),
        };
        let storage = Arc::new(FlakyStore::new(inner));
        let store = FavoritesStore::load(storage.clone()).await;
        (storage, store)
    }

    async fn persisted(storage: &FlakyStore) -> Option<FavoriteSet> {
        storage
            .get(FAVORITES_KEY)
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let (_, store) = store_with(None).await;
        assert!(store.favorites().is_empty());
        assert!(!store.is_favorite("1"));
    }

    #[tokio::test]
    async fn test_load_corrupt_is_empty() {
        let (_, store) = store_with(Some("[1, 2")).await;
        assert!(store.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_load_unreadable_is_empty() {
        let storage = Arc::new(FlakyStore::new(InMemoryKeyValueStore::with_entries([(
            FAVORITES_KEY,
            r#"["1"]"#,
        )])));
        storage.fail_reads(true);
        let store = FavoritesStore::load(storage).await;
        assert!(store.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_persists_then_notifies() {
        let (storage, store) = store_with(None).await;
        let mut rx = store.subscribe();

        assert!(store.toggle_favorite("3").await);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().contains("3"));
        assert_eq!(
            persisted(&storage).await,
            Some(FavoriteSet::from_iter(["3"]))
        );

        assert!(!store.toggle_favorite("3").await);
        assert!(!store.is_favorite("3"));
        assert_eq!(persisted(&storage).await, Some(FavoriteSet::new()));
    }

    #[tokio::test]
    async fn test_toggle_parity() {
        let (_, store) = store_with(Some(r#"["5"]"#)).await;
        for count in 1..=7 {
            store.toggle_favorite("5").await;
            assert_eq!(store.is_favorite("5"), count % 2 == 0, "after {count} toggles");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_are_not_lost() {
        let (storage, store) = store_with(None).await;
        let store = Arc::new(store);

        let tasks: Vec<_> = (0..9)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.toggle_favorite("8").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert!(store.is_favorite("8"));
        assert!(persisted(&storage).await.unwrap().contains("8"));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_and_stays_quiet() {
        let (storage, store) = store_with(Some(r#"["1"]"#)).await;
        let mut rx = store.subscribe();
        rx.borrow_and_update();
        storage.fail_writes(true);

        assert!(!store.toggle_favorite("2").await);
        assert!(store.toggle_favorite("1").await);
        store.clear_favorites().await;

        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.favorites(), FavoriteSet::from_iter(["1"]));
    }

    #[tokio::test]
    async fn test_clear_favorites() {
        let (storage, store) = store_with(Some(r#"["1","2"]"#)).await;
        store.clear_favorites().await;

        assert!(!store.is_favorite("1"));
        assert!(!store.is_favorite("never-added"));
        assert_eq!(persisted(&storage).await, Some(FavoriteSet::new()));
    }

    #[tokio::test]
    async fn test_favorite_sites_in_catalog_order() {
        let (_, store) = store_with(None).await;
        store.toggle_favorite("12").await;
        store.toggle_favorite("1").await;
        store.toggle_favorite("missing").await;

        let sites = builtin_sites();
        let ids: Vec<&str> = store
            .favorite_sites(sites)
            .into_iter()
            .map(|site| site.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "12"]);
    }
}
