pub mod random;
pub mod seq;

use fiftyfifty_core::SetId;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// The 62 symbols a set id is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Trait for generating set ids.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is enforced by the store's conditional insert, not here, so a
/// generator never retries or checks for collisions.
pub trait Generator: Send + Sync + 'static {
    fn generate(&self) -> SetId;
}
