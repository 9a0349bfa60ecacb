use fiftyfifty_core::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("mysql not reachable after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
    #[error("video set store setup failed: {0}")]
    Store(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
