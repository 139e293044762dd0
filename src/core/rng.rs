//! Deterministic shuffle source for deals.
//!
//! The engine never owns randomness: `MatchEngine::new_deal` borrows any
//! `rand::Rng` from the caller. `DealRng` is the seeded source the driver,
//! the random agent and the tests use, so a match is reproducible from a
//! single `u64`.
//!
//! ```
//! use rand::RngCore;
//! use truco_engine::core::DealRng;
//!
//! let mut rng = DealRng::new(7);
//! let mut again = DealRng::new(7);
//! assert_eq!(rng.next_u64(), again.next_u64());
//! ```

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct DealRng {
    inner: ChaCha8Rng,
}

impl DealRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniformly pick one element, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}

impl RngCore for DealRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
