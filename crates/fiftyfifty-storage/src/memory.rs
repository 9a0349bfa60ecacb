use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use fiftyfifty_core::repository::{ReadRepository, Repository, Result};
use fiftyfifty_core::{SetId, SetSnapshot, StorageError, VideoSet};
use tracing::debug;

/// In-memory implementation of the repository traits using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. The conditional insert goes through the entry
/// API, so the existence check and the write happen under one shard lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<SetId, VideoSet>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Returns the full stored record, including creation metadata.
    pub fn get_full(&self, id: &SetId) -> Option<VideoSet> {
        self.storage.get(id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: &SetId) -> Result<Option<SetSnapshot>> {
        Ok(self.storage.get(id).map(|entry| entry.snapshot()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, set: &VideoSet) -> Result<()> {
        match self.storage.entry(set.id.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(set.id.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(set.clone());
                debug!(set_id = %set.id, "stored video set in memory");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiftyfifty_core::{VideoId, VideoRef};
    use jiff::Timestamp;
    use std::sync::Arc;

    fn id(s: &str) -> SetId {
        SetId::new_unchecked(s)
    }

    fn set(set_id: &str, title: &str) -> VideoSet {
        VideoSet {
            id: id(set_id),
            title: title.to_string(),
            a: VideoRef::new(VideoId::parse("aaaaaaaaaaa").unwrap(), Some(90)),
            b: VideoRef::new(VideoId::parse("bbbbbbbbbbb").unwrap(), None),
            creator_address: "10.0.0.1".to_string(),
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();
        let stored = set("abc123", "Cats vs dogs");

        repo.insert(&stored).await.unwrap();

        let result = repo.get(&id("abc123")).await.unwrap().unwrap();
        assert_eq!(result, stored.snapshot());
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&id("nope12")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_existing_record() {
        let repo = InMemoryRepository::new();

        repo.insert(&set("abc123", "first")).await.unwrap();

        let err = repo.insert(&set("abc123", "second")).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(ref code) if code == "abc123"));

        let result = repo.get(&id("abc123")).await.unwrap().unwrap();
        assert_eq!(result.title, "first");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_case_sensitive() {
        let repo = InMemoryRepository::new();

        repo.insert(&set("abcDEF", "lower-upper")).await.unwrap();
        repo.insert(&set("ABCdef", "upper-lower")).await.unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(
            repo.get(&id("ABCdef")).await.unwrap().unwrap().title,
            "upper-lower"
        );
    }

    #[tokio::test]
    async fn get_full_keeps_creation_metadata() {
        let repo = InMemoryRepository::new();
        let stored = set("abc123", "Cats vs dogs");
        repo.insert(&stored).await.unwrap();

        let full = repo.get_full(&id("abc123")).unwrap();
        assert_eq!(full.creator_address, "10.0.0.1");
        assert_eq!(full.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_id_admit_exactly_one() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&set("same12", &format!("attempt {i}"))).await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(StorageError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 31);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&set(&format!("code{:02}", i), &format!("set {i}")))
                    .await
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let result = repo.get(&id(&format!("code{:02}", i))).await.unwrap().unwrap();
            assert_eq!(result.title, format!("set {i}"));
        }
    }
}
