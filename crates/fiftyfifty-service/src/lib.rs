//! Video set service: validates and stores new sets, and resolves lookups
//! through the snapshot cache.
//!
//! # Example
//!
//! ```rust
//! use fiftyfifty_service::{NewVideoSet, VideoSetService, VideoSets};
//! use fiftyfifty_cache::LruSetCache;
//! use fiftyfifty_core::MemberChoice;
//! use fiftyfifty_generator::RandomGenerator;
//! use fiftyfifty_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = VideoSetService::new(
//!     InMemoryRepository::new(),
//!     RandomGenerator,
//!     LruSetCache::new(),
//! );
//!
//! let created = service
//!     .create(NewVideoSet {
//!         title: "Rick or Psy".to_string(),
//!         video_a: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
//!         video_b: "https://youtu.be/9bZkp7q19f0".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! if let Some(video) = service.resolve(&created.id, MemberChoice::Random).await? {
//!     println!("watch {} from {:?}", video.video_id, video.start_time);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;
pub mod sets;
pub mod validation;

pub use error::{Result, ServiceError};
pub use service::{VideoSetService, DEFAULT_STORE_TIMEOUT};
pub use sets::{CreatedSet, VideoSets};
pub use validation::{validate, NewVideoSet, ValidatedSet, ValidationErrors, ValidationIssue};
