use crate::{Generator, ALPHABET};
use fiftyfifty_core::set_id::SET_ID_LENGTH;
use fiftyfifty_core::SetId;
use std::sync::atomic::{AtomicU64, Ordering};

/// 62^6, the size of the set id space.
const ID_SPACE: u64 = 56_800_235_584;

/// A deterministic set id generator backed by a counter.
///
/// Each call encodes the next counter value in base 62 over [`ALPHABET`],
/// left-padded to six symbols, so the first id is `aaaaaa`, then `aaaaab`.
/// The counter wraps around at the end of the id space.
///
/// Two generators started at the same offset produce the same ids, which is
/// how collisions against the store's conditional insert are reproduced.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state or handing out disjoint
    /// counter ranges to different nodes.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(mut value: u64) -> String {
    value %= ID_SPACE;
    let mut symbols = [ALPHABET[0]; SET_ID_LENGTH];
    for slot in symbols.iter_mut().rev() {
        *slot = ALPHABET[(value % 62) as usize];
        value /= 62;
    }
    symbols.iter().map(|&b| char::from(b)).collect()
}

impl Generator for SeqGenerator {
    fn generate(&self) -> SetId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        SetId::new_unchecked(encode(count))
    }
}
