//! Random account id generation
//!
//! Ids are drawn uniformly from a fixed numeric range (five digits by default)
//! and rendered as decimal text. Draws may repeat; collision handling lives in
//! the account store.

use crate::core::traits::IdGenerator;
use crate::types::AccountId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Default id range: every five-digit number
pub const DEFAULT_ID_RANGE: RangeInclusive<u32> = 10000..=99999;

/// Draws account ids uniformly from an inclusive range
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    range: RangeInclusive<u32>,
    rng: StdRng,
}

impl RandomIdGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new(range: RangeInclusive<u32>) -> Self {
        RandomIdGenerator {
            range,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed, for reproducible sequences
    pub fn with_seed(range: RangeInclusive<u32>, seed: u64) -> Self {
        RandomIdGenerator {
            range,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_RANGE)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> AccountId {
        self.rng.gen_range(self.range.clone()).to_string()
    }
}
