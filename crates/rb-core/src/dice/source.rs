//! Uniform face-value generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces independent, uniformly distributed face values.
pub trait RandomSource {
    /// Roll one die: a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// The default source, backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible source for tests and `--seed` runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}
