use async_trait::async_trait;
use fiftyfifty_core::cache::{Result, SetCache};
use fiftyfifty_core::{CacheError, SetId, SetSnapshot};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Default maximum number of cached sets.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;
/// Default budget for the summed serialized size of all cached sets.
pub const DEFAULT_MAX_BYTES: usize = 100_000;

#[derive(Debug)]
struct Weighted {
    snapshot: SetSnapshot,
    weight: usize,
}

struct Inner {
    entries: LruCache<SetId, Weighted>,
    used_bytes: usize,
}

/// An in-process LRU cache of set snapshots with two capacity limits.
///
/// The cache holds at most `max_entries` snapshots and at most `max_bytes`
/// of serialized snapshot data, where the weight of an entry is the length
/// of its JSON encoding. Whichever limit is exceeded, the least recently
/// used entries are evicted until both hold again. Reads count as use.
///
/// Clones share the same underlying storage.
#[derive(Clone)]
pub struct LruSetCache {
    inner: Arc<Mutex<Inner>>,
    max_bytes: usize,
}

impl LruSetCache {
    /// Creates a cache with [`DEFAULT_MAX_ENTRIES`] and [`DEFAULT_MAX_BYTES`].
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_BYTES)
    }

    /// Creates a cache with custom limits.
    ///
    /// A `max_entries` of zero is treated as one.
    pub fn with_limits(max_entries: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: LruCache::new(capacity),
                used_bytes: 0,
            })),
            max_bytes,
        }
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }

    /// Number of cached snapshots.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summed weight of all cached snapshots, in bytes.
    pub fn weighted_size(&self) -> usize {
        self.inner.lock().used_bytes
    }

    pub fn max_entries(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Checks for a key without counting as a use.
    pub fn contains(&self, id: &SetId) -> bool {
        self.inner.lock().entries.contains(id)
    }
}

impl Default for LruSetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LruSetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LruSetCache")
            .field("len", &inner.entries.len())
            .field("max_entries", &inner.entries.cap())
            .field("used_bytes", &inner.used_bytes)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

fn weigh(snapshot: &SetSnapshot) -> Result<usize> {
    serde_json::to_vec(snapshot)
        .map(|encoded| encoded.len())
        .map_err(|e| CacheError::Serialization(format!("failed to weigh snapshot: {e}")))
}

#[async_trait]
impl SetCache for LruSetCache {
    async fn get_snapshot(&self, id: &SetId) -> Result<Option<SetSnapshot>> {
        let mut inner = self.inner.lock();
        match inner.entries.get(id) {
            Some(entry) => {
                debug!(set_id = %id, "snapshot cache hit");
                Ok(Some(entry.snapshot.clone()))
            }
            None => {
                trace!(set_id = %id, "snapshot cache miss");
                Ok(None)
            }
        }
    }

    async fn set_snapshot(&self, id: &SetId, snapshot: &SetSnapshot) -> Result<()> {
        let weight = weigh(snapshot)?;
        if weight > self.max_bytes {
            debug!(set_id = %id, weight, max_bytes = self.max_bytes, "snapshot too large to cache");
            return Ok(());
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let entry = Weighted {
            snapshot: snapshot.clone(),
            weight,
        };
        // `push` hands back either the previous value for this key or the
        // entry evicted by the count limit.
        if let Some((displaced_id, displaced)) = inner.entries.push(id.clone(), entry) {
            inner.used_bytes -= displaced.weight;
            if displaced_id != *id {
                trace!(set_id = %displaced_id, "evicted snapshot over entry limit");
            }
        }
        inner.used_bytes += weight;

        while inner.used_bytes > self.max_bytes {
            let Some((evicted_id, evicted)) = inner.entries.pop_lru() else {
                break;
            };
            inner.used_bytes -= evicted.weight;
            trace!(set_id = %evicted_id, "evicted snapshot over size budget");
        }

        debug!(set_id = %id, weight, used_bytes = inner.used_bytes, "cached snapshot");
        Ok(())
    }
}

/// Configuration for creating a [`LruSetCache`] with custom settings.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,
    /// Maximum summed serialized size of all entries.
    #[builder(default = DEFAULT_MAX_BYTES)]
    max_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::builder().build()
    }
}

impl From<CacheConfig> for LruSetCache {
    fn from(config: CacheConfig) -> Self {
        LruSetCache::with_limits(config.max_entries, config.max_bytes)
    }
}
