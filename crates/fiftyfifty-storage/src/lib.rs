pub mod memory;
pub mod mysql;

pub use fiftyfifty_core::repository::{ReadRepository, Repository, Result};
pub use fiftyfifty_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
