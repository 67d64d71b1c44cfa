//! In-memory key-value store for tests and ephemeral sessions.

use async_trait::async_trait;
use sanskriti_core::error::StorageResult;
use sanskriti_core::storage::KeyValueStore;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// [`KeyValueStore`] that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let store = InMemoryKeyValueStore::with_entries([("theme", "system")]);
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("system"));

        store.set("theme", "light").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));

        store.remove("theme").await.unwrap();
        assert!(store.is_empty().await);
    }
}
