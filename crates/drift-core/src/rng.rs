//! Deterministic RNG wrapper.
//!
//! Each point source owns its own [`SimRng`], derived from the run's master
//! seed via [`SimRng::child`].  This keeps sources independent — adding a
//! source never perturbs the random sequence of an existing one — and makes
//! whole runs reproducible from a single seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded, reproducible RNG for simulation state.
///
/// Used only under the single-writer discipline; if parallel randomness is
/// ever needed, give each worker its own `SimRng` derived via [`child`].
///
/// [`child`]: SimRng::child
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — used to seed
    /// per-source RNGs deterministically from the master seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed
    /// type; `random::<f64>()` is uniform in [0, 1).
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
