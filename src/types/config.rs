//! Simulation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulation steps.
    pub n_steps: u32,

    /// Initial fair price.
    pub initial_price: f64,

    /// Initial X reserves.
    pub initial_x: f64,

    /// Initial Y reserves.
    pub initial_y: f64,

    /// GBM drift (annualized).
    pub gbm_mu: f64,

    /// GBM volatility (annualized).
    pub gbm_sigma: f64,

    /// GBM time step.
    pub gbm_dt: f64,

    /// Retail order arrival rate (Poisson lambda).
    pub retail_arrival_rate: f64,

    /// Mean retail order size (lognormal mean).
    pub retail_mean_size: f64,

    /// Lognormal sigma for retail order sizes (log-space).
    pub retail_size_sigma: f64,

    /// Probability of buy order.
    pub retail_buy_prob: f64,

    /// Random seed for reproducibility (None = random).
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_steps: 10_000,
            initial_price: 1.0,
            initial_x: 1_000_000.0,
            initial_y: 1_000_000.0,
            gbm_mu: 0.0,
            gbm_sigma: 0.3,
            gbm_dt: 1.0 / (365.0 * 24.0 * 60.0),
            retail_arrival_rate: 5.0,
            retail_mean_size: 1_000.0,
            retail_size_sigma: 0.8,
            retail_buy_prob: 0.5,
            seed: None,
        }
    }
}

/// Configuration for hyperparameter variance across simulations.
#[derive(Debug, Clone)]
pub struct HyperparameterVariance {
    pub retail_mean_size_min: f64,
    pub retail_mean_size_max: f64,
    pub vary_retail_mean_size: bool,

    pub retail_arrival_rate_min: f64,
    pub retail_arrival_rate_max: f64,
    pub vary_retail_arrival_rate: bool,

    pub gbm_sigma_min: f64,
    pub gbm_sigma_max: f64,
    pub vary_gbm_sigma: bool,
}

impl HyperparameterVariance {
    /// Apply variance to create a new config based on seed.
    pub fn apply(&self, base: &SimulationConfig, seed: u64) -> SimulationConfig {
        use rand::Rng;
        use rand::SeedableRng;
        use rand_pcg::Pcg64;

        let mut rng = Pcg64::seed_from_u64(seed);

        let retail_mean_size = if self.vary_retail_mean_size {
            rng.gen_range(self.retail_mean_size_min..self.retail_mean_size_max)
        } else {
            base.retail_mean_size
        };

        let retail_arrival_rate = if self.vary_retail_arrival_rate {
            rng.gen_range(self.retail_arrival_rate_min..self.retail_arrival_rate_max)
        } else {
            base.retail_arrival_rate
        };

        let gbm_sigma = if self.vary_gbm_sigma {
            rng.gen_range(self.gbm_sigma_min..self.gbm_sigma_max)
        } else {
            base.gbm_sigma
        };

        SimulationConfig {
            n_steps: base.n_steps,
            initial_price: base.initial_price,
            initial_x: base.initial_x,
            initial_y: base.initial_y,
            gbm_mu: base.gbm_mu,
            gbm_sigma,
            gbm_dt: base.gbm_dt,
            retail_arrival_rate,
            retail_mean_size,
            retail_size_sigma: base.retail_size_sigma,
            retail_buy_prob: base.retail_buy_prob,
            seed: Some(seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_well_formed() {
        let cfg = SimulationConfig::default();
        assert!(cfg.n_steps > 0);
        assert!(cfg.initial_x > 0.0 && cfg.initial_y > 0.0);
    }
}
