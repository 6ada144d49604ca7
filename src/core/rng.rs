//! Deterministic random number generation for the scripted opponent.
//!
//! The same seed produces identical choices, so a scripted duel can be
//! replayed exactly.
//!
//! ```
//! use slap_duel::core::DuelRng;
//!
//! let mut rng = DuelRng::new(42);
//! let mut again = DuelRng::new(42);
//! assert_eq!(rng.gen_value(), again.gen_value());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::action::{MAX_VALUE, MIN_VALUE};

/// Seeded randomness source injected into the scripted opponent.
///
/// Uses ChaCha8 for speed while keeping a well-distributed sequence.
#[derive(Clone, Debug)]
pub struct DuelRng {
    inner: ChaCha8Rng,
}

impl DuelRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniformly draw a commit or guess value in `1..=3`.
    pub fn gen_value(&mut self) -> u8 {
        self.inner.gen_range(MIN_VALUE..=MAX_VALUE)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
