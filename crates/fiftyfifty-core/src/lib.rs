//! Core types and traits for the fiftyfifty video set service.
//!
//! This crate provides the domain model, the link/time parser, and the
//! store and cache traits shared by the service and its adapters.

pub mod cache;
pub mod error;
pub mod reference;
pub mod repository;
pub mod set;
pub mod set_id;
pub mod video;

pub use cache::SetCache;
pub use error::{CacheError, CoreError, StorageError};
pub use reference::{extract_video_id, parse_start_time};
pub use repository::{ReadRepository, Repository};
pub use set::{ResolvedVideo, SetSnapshot, VideoSet, MAX_TITLE_CHARS};
pub use set_id::SetId;
pub use video::{Member, MemberChoice, VideoId, VideoRef};
