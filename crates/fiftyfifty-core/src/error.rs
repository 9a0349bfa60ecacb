use thiserror::Error;

/// Errors related to the core domain types of the video set service.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid set id: {0}")]
    InvalidSetId(String),
    #[error("invalid video id: {0}")]
    InvalidVideoId(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("video set already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache serialization failed: {0}")]
    Serialization(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}
