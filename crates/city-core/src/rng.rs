//! Simulation-level RNG wrapper.
//!
//! The engine itself promises no reproducibility: world generation and
//! random event placement simply draw from whatever `SimRng` the host hands
//! in.  A host that wants repeatable runs constructs it with
//! [`SimRng::new`]; otherwise [`SimRng::from_entropy`] seeds from the OS.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random source for world generation and exogenous events.
///
/// Used only from the single simulation thread.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Deterministic RNG from a fixed seed.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Non-reproducible RNG seeded from OS entropy.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Seeded when `seed` is `Some`, entropy-seeded otherwise.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => Self::from_entropy(),
        }
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
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
