use crate::validation::ValidationErrors;
use fiftyfifty_core::{CacheError, SetId, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("invalid video set: {0}")]
    Validation(ValidationErrors),
    #[error("video set id already taken: {0}")]
    Conflict(SetId),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}
