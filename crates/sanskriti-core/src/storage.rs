//! Local durable key-value storage port.

use async_trait::async_trait;

use crate::error::StorageResult;

/// Key under which the cached [`Identity`](crate::identity::Identity) lives.
pub const IDENTITY_KEY: &str = "user";

/// Key under which the favorite site ids live.
pub const FAVORITES_KEY: &str = "@sanskritiar_favorites";

/// Key under which the display preference mode lives.
pub const THEME_KEY: &str = "theme";

/// Asynchronous string key-value storage.
///
/// A failed `set` or `remove` must leave the previous value in place; callers
/// never observe partial writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
