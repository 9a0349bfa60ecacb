use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::sets::{CreatedSet, VideoSets};
use crate::validation::{validate, NewVideoSet};
use crate::{Result, ServiceError};
use async_trait::async_trait;
use fiftyfifty_core::{
    MemberChoice, ReadRepository, Repository, ResolvedVideo, SetCache, SetId, StorageError,
    VideoSet,
};
use fiftyfifty_generator::Generator;
use jiff::Timestamp;
use tracing::{debug, info, trace, warn};

/// Upper bound on a single store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates and resolves video sets.
///
/// Lookups go through the snapshot cache first and fall back to the
/// repository; a successful create seeds the cache with the new set.
#[derive(Debug)]
pub struct VideoSetService<R, G, C> {
    repository: Arc<R>,
    generator: Arc<G>,
    cache: Arc<C>,
    store_timeout: Duration,
}

impl<R, G, C> Clone for VideoSetService<R, G, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            cache: Arc::clone(&self.cache),
            store_timeout: self.store_timeout,
        }
    }
}

impl<R: Repository, G: Generator, C: SetCache> VideoSetService<R, G, C> {
    pub fn new(repository: R, generator: G, cache: C) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            cache: Arc::new(cache),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Bounds every repository call by `timeout`.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn timed<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = std::result::Result<T, StorageError>>,
    ) -> std::result::Result<T, StorageError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.store_timeout, "store call timed out");
                Err(StorageError::Timeout(format!(
                    "{operation} did not complete within {:?}",
                    self.store_timeout
                )))
            }
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator, C: SetCache> VideoSets for VideoSetService<R, G, C> {
    async fn create(&self, request: NewVideoSet) -> Result<CreatedSet> {
        let validated = validate(&request)?;
        let id = self.generator.generate();

        let set = VideoSet {
            id: id.clone(),
            title: validated.title,
            a: validated.a,
            b: validated.b,
            creator_address: request.creator_address,
            created_at: Timestamp::now(),
        };

        match self.timed("insert", self.repository.insert(&set)).await {
            Ok(()) => {}
            Err(StorageError::Conflict(_)) => {
                warn!(set_id = %id, "generated set id is already taken");
                return Err(ServiceError::Conflict(id));
            }
            Err(err) => return Err(err.into()),
        }

        // The insert has committed; the next lookup backfills a missed seed.
        if let Err(err) = self.cache.set_snapshot(&id, &set.snapshot()).await {
            warn!(set_id = %id, error = %err, "failed to seed snapshot cache");
        }

        info!(set_id = %id, title = %set.title, "created video set");
        Ok(CreatedSet {
            id,
            title: set.title,
        })
    }

    async fn resolve(&self, id: &SetId, choice: MemberChoice) -> Result<Option<ResolvedVideo>> {
        let member = choice.resolve();
        trace!(set_id = %id, %member, "resolving video set member");

        let snapshot = self
            .cache
            .get_or_compute(id, move |id| {
                let id = id.clone();
                async move {
                    self.timed("get", self.repository.get(&id))
                        .await
                        .map_err(ServiceError::from)
                }
            })
            .await?;

        match snapshot {
            Some(snapshot) => {
                debug!(set_id = %id, %member, "resolved video set member");
                Ok(Some(snapshot.resolve(id, member)))
            }
            None => {
                trace!(set_id = %id, "video set not found");
                Ok(None)
            }
        }
    }
}
