// Synthetic request stream generation

use crate::models::WorkloadConfig;
use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator for hot-set skewed request streams
///
/// The first `hot_percent`% of the key space forms the hot set and receives
/// `hot_traffic`% of the requests; the remaining requests are spread uniformly
/// over the cold keys. The stream is fully determined by the seed.
#[derive(Debug, Clone)]
pub struct TrafficGenerator {
    config: WorkloadConfig,
}

impl TrafficGenerator {
    /// Create a generator, rejecting configurations that cannot produce keys
    pub fn new(config: WorkloadConfig) -> Result<Self> {
        ensure!(config.keys > 0, "--keys must be at least 1");
        ensure!(
            config.hot_percent <= 100,
            "--hot-percent must be between 0 and 100, got {}",
            config.hot_percent
        );
        ensure!(
            config.hot_traffic <= 100,
            "--hot-traffic must be between 0 and 100, got {}",
            config.hot_traffic
        );
        Ok(Self { config })
    }

    /// Number of keys in the hot set. Never zero, never more than the key space.
    pub fn hot_keys(&self) -> u64 {
        let hot = self.config.keys * u64::from(self.config.hot_percent) / 100;
        hot.clamp(1, self.config.keys)
    }

    /// Generate the full request stream
    pub fn generate(&self) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let hot = self.hot_keys();
        let cold = self.config.keys - hot;
        let hot_probability = f64::from(self.config.hot_traffic) / 100.0;

        (0..self.config.requests)
            .map(|_| {
                if cold == 0 || rng.gen_bool(hot_probability) {
                    rng.gen_range(0..hot)
                } else {
                    hot + rng.gen_range(0..cold)
                }
            })
            .collect()
    }
}
