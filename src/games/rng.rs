//! Randomness sources for the decision and number-selection steps
//!
//! The engine never calls a global RNG; it draws from a `RandomSource`
//! handed to it at construction.

use crate::errors::{ConfigurationError, GameError, GameResult};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};

/// Uniform sample source
pub trait RandomSource: Send {
    /// Uniform real in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, upper)`. `upper` must be non-zero.
    fn next_index(&mut self, upper: usize) -> usize {
        let idx = (self.next_unit() * upper as f64).floor() as usize;
        idx.min(upper.saturating_sub(1))
    }
}

impl RandomSource for Box<dyn RandomSource> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// `StdRng`-backed source for production and simulations
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    /// Seed from OS entropy. Fails when the OS source is unavailable.
    pub fn from_entropy() -> Result<Self, ConfigurationError> {
        let rng = StdRng::from_rng(OsRng)
            .map_err(|e| ConfigurationError::RandomSourceUnavailable(e.to_string()))?;
        Ok(Self { rng })
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Result<Self, ConfigurationError> {
        match seed {
            Some(seed) => Ok(Self::seeded(seed)),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SystemRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

/// Replays a fixed list of unit samples, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(samples: Vec<f64>) -> GameResult<Self> {
        if samples.is_empty() {
            return Err(GameError::EmptyScript);
        }
        Ok(Self { samples, cursor: 0 })
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self {
            samples: vec![value],
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        value
    }
}
