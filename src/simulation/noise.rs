//! Gaussian measurement noise.
//!
//! Each sensor owns its injector so runs can be reproduced from a seed without
//! sensors drawing from one shared stream.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{SimResult, SimulationError};

pub struct NoiseInjector {
    rng: StdRng,
}

impl NoiseInjector {
    /// Seeded when `seed` is given, otherwise drawn from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Add one fresh zero-mean Gaussian sample with the given standard deviation
    pub fn perturb(&mut self, value: f64, std_dev: f64) -> SimResult<f64> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimulationError::InvalidNoiseStdDev(std_dev));
        }
        if std_dev == 0.0 {
            return Ok(value);
        }
        let normal =
            Normal::new(0.0, std_dev).map_err(|_| SimulationError::InvalidNoiseStdDev(std_dev))?;
        Ok(value + normal.sample(&mut self.rng))
    }
}

impl std::fmt::Debug for NoiseInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseInjector").finish_non_exhaustive()
    }
}
