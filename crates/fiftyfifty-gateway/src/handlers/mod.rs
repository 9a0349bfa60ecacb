mod health;
mod sets;

pub use health::health_handler;
pub use sets::{create_set_handler, member_handler, random_member_handler};
