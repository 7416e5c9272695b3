//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulator may call any platform RNG.
//! A run owns exactly one SimRng, seeded from the run's seed, and every
//! draw (root variables and noise alike) advances that one stream.
//!
//! The draw order is part of the output contract:
//!   A1 (N draws), A2 (N draws), then N noise draws per derived column
//!   in DAG order. Changing the order changes every table.

use crate::error::{SimError, SimResult};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;

/// The single deterministic RNG of a generation run.
pub struct SimRng {
    seed: u64,
    inner: Pcg64Mcg,
    draws: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
            draws: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw `count` independent values from Normal(mean, std_dev).
    pub fn draw_normal(&mut self, mean: f64, std_dev: f64, count: usize) -> SimResult<Vec<f64>> {
        let dist = Normal::new(mean, std_dev).map_err(|e| {
            SimError::invalid_config(format!("normal({mean}, {std_dev}): {e}"))
        })?;
        let values: Vec<f64> = (0..count).map(|_| dist.sample(&mut self.inner)).collect();
        self.draws += count as u64;
        Ok(values)
    }
}

/// Parse a seed from user input. Any integer that fits in 64 bits is
/// accepted; negative values wrap to their two's-complement `u64`.
pub fn parse_seed(input: &str) -> SimResult<u64> {
    let trimmed = input.trim();
    if let Ok(seed) = trimmed.parse::<u64>() {
        return Ok(seed);
    }
    trimmed
        .parse::<i64>()
        .map(|s| s as u64)
        .map_err(|_| SimError::InvalidSeed { input: input.to_string() })
}
