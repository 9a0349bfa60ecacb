//! Disposable backing services for integration tests.

pub mod error;
pub mod mysql;
pub mod store;

pub use error::{Result, TestInfraError};
pub use store::VideoSetStore;
