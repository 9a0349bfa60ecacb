use crate::error::CacheError;
use crate::set::SetSnapshot;
use crate::set_id::SetId;
use async_trait::async_trait;
use std::future::Future;
use tracing::trace;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A cache of set snapshots.
///
/// This trait provides a domain-specific caching abstraction for
/// [`SetSnapshot`]s, using [`SetId`] as the key. Sets are immutable, so
/// implementations never need to invalidate an entry; they only evict.
#[async_trait]
pub trait SetCache: Send + Sync + 'static {
    /// Get a snapshot from the cache.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get_snapshot(&self, id: &SetId) -> Result<Option<SetSnapshot>>;

    /// Store a snapshot in the cache.
    async fn set_snapshot(&self, id: &SetId, snapshot: &SetSnapshot) -> Result<()>;

    /// Get a snapshot from the cache, fetching and backfilling it on a miss.
    ///
    /// Concurrent misses for the same key are not coalesced; each one calls
    /// `fetch` and writes the (identical) result back.
    async fn get_or_compute<F, Fut, E>(
        &self,
        id: &SetId,
        fetch: F,
    ) -> std::result::Result<Option<SetSnapshot>, E>
    where
        F: FnOnce(&SetId) -> Fut + Send,
        Fut: Future<Output = std::result::Result<Option<SetSnapshot>, E>> + Send,
        E: From<CacheError> + Send,
    {
        if let Some(snapshot) = self.get_snapshot(id).await? {
            return Ok(Some(snapshot));
        }

        trace!(set_id = %id, "cache miss, fetching snapshot");
        let snapshot = fetch(id).await?;
        if let Some(ref value) = snapshot {
            self.set_snapshot(id, value).await?;
        }
        Ok(snapshot)
    }
}
