//! File-backed key-value store.
//!
//! All keys live in one JSON document so every write is a single atomic
//! rename. Blocking file IO runs on the blocking thread pool.

use super::atomic_file::{AtomicFile, AtomicFileError};
use crate::paths::{PathError, SanskritiPaths};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sanskriti_core::error::{PersistenceError, StorageResult};
use sanskriti_core::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// On-disk layout of the key-value document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Durable [`KeyValueStore`] backed by `storage.json`.
///
/// # Example
///
/// ```ignore
/// use sanskriti_infrastructure::storage::FileKeyValueStore;
///
/// let store = FileKeyValueStore::new(dir.join("storage.json"));
/// store.set("theme", "dark").await?;
/// ```
#[derive(Clone)]
pub struct FileKeyValueStore {
    file: Arc<AtomicFile<StorageDocument>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path)),
        }
    }

    /// Opens the store at its platform location.
    pub fn from_paths(paths: &SanskritiPaths) -> Result<Self, PathError> {
        Ok(Self::new(paths.storage_file()?))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Runs a locked read-modify-write of the document.
    async fn mutate<F>(&self, f: F) -> StorageResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) + Send + 'static,
    {
        let file = self.file.clone();
        run_blocking(move || {
            file.update_or_recover(StorageDocument::default(), quarantine, |doc| {
                f(&mut doc.entries);
                doc.updated_at = Some(Utc::now());
                Ok(())
            })
        })
        .await
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let file = self.file.clone();
        let key = key.to_string();
        run_blocking(move || Ok(file.load()?.and_then(|mut doc| doc.entries.remove(&key)))).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.mutate(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let key = key.to_string();
        self.mutate(move |entries| {
            entries.remove(&key);
        })
        .await
    }
}

/// Moves an unreadable document aside so writes can start from empty.
/// Runs under the document lock.
fn quarantine(path: &Path, err: AtomicFileError) -> Result<(), AtomicFileError> {
    let aside = path.with_extension("json.corrupt");
    tracing::warn!(
        "[FileKeyValueStore] Unreadable store {:?} ({}), moving it to {:?}",
        path,
        err,
        aside
    );
    std::fs::rename(path, &aside).map_err(AtomicFileError::IoError)
}

async fn run_blocking<R, F>(f: F) -> StorageResult<R>
where
    F: FnOnce() -> Result<R, AtomicFileError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PersistenceError::Unavailable(format!("Failed to join task: {}", e)))?
        .map_err(Into::into)
}
