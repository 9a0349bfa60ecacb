use crate::{Generator, ALPHABET};
use fiftyfifty_core::set_id::SET_ID_LENGTH;
use fiftyfifty_core::SetId;
use rand::Rng;

/// Generates set ids by drawing each character uniformly and independently
/// from [`ALPHABET`].
///
/// Uses the thread-local RNG. It is not meant to be unpredictable; collision
/// handling belongs to the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> SetId {
        let mut rng = rand::rng();
        let id: String = (0..SET_ID_LENGTH)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect();
        SetId::new_unchecked(id)
    }
}
