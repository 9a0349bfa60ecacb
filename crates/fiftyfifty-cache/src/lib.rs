//! Snapshot cache implementations for the video set service.

pub mod memory;

pub use fiftyfifty_core::cache::{Result, SetCache};
pub use fiftyfifty_core::CacheError;
pub use memory::{CacheConfig, LruSetCache};
