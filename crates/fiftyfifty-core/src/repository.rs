use crate::error::StorageError;
use crate::set::{SetSnapshot, VideoSet};
use crate::set_id::SetId;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the set store.
///
/// This trait provides only the read operations from [`Repository`],
/// so lookup paths can be handed read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the lookup fields of a set.
    /// Returns `None` if the set does not exist.
    async fn get(&self, id: &SetId) -> Result<Option<SetSnapshot>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new set, only if no set with the same id exists.
    ///
    /// Returns `Err(StorageError::Conflict)` if the id is already taken; the
    /// existing record is left untouched.
    async fn insert(&self, set: &VideoSet) -> Result<()>;
}

#[async_trait]
impl<T: ReadRepository + ?Sized> ReadRepository for Arc<T> {
    async fn get(&self, id: &SetId) -> Result<Option<SetSnapshot>> {
        (**self).get(id).await
    }
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn insert(&self, set: &VideoSet) -> Result<()> {
        (**self).insert(set).await
    }
}
