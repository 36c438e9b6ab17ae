//! Per-seed head-to-head simulation loop: submission strategy vs. baseline
//! strategy, each in its own pool, facing an identical GBM price path and
//! identical retail order stream so the comparison is apples-to-apples.
//!
//! There is deliberately no cross-pool routing here (see `market` module
//! docs) — each pool is arbitraged and hit by retail flow independently.

use std::collections::HashMap;

use crate::amm::Pool;
use crate::market::{Arbitrageur, GBMPriceProcess, RetailOrder, RetailTrader};
use crate::strategy::contract::Strategy;
use crate::types::config::SimulationConfig;
use crate::types::decimal::Decimal;
use crate::types::result::{LightweightSimResult, LightweightStepResult};

/// Errors that can abort a simulation before it produces a result.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("strategy error: {0}")]
    Strategy(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Runs one seeded simulation of `submission` against `baseline`.
pub struct SimulationEngine {
    config: SimulationConfig,
}

struct PoolRun {
    name: String,
    pool: Pool,
    arbitrageur: Arbitrageur,
    pnl: f64,
    arb_volume_y: f64,
    retail_volume_y: f64,
    fee_bid_sum: f64,
    fee_ask_sum: f64,
}

impl PoolRun {
    fn new(strategy: Box<dyn Strategy>, initial_x: Decimal, initial_y: Decimal) -> Self {
        let name = strategy.name().to_string();
        Self {
            name,
            pool: Pool::new(strategy, initial_x, initial_y),
            arbitrageur: Arbitrageur::new(),
            pnl: 0.0,
            arb_volume_y: 0.0,
            retail_volume_y: 0.0,
            fee_bid_sum: 0.0,
            fee_ask_sum: 0.0,
        }
    }

    /// Apply one retail order against this pool using the fair-price
    /// approximation: a retail order is sized in Y, so both buy and sell
    /// sides convert to an X amount via `size / fair_price`. See DESIGN.md
    /// (Open Question 8) for why this differs from an exact inverse-quote
    /// conversion.
    fn apply_retail_order(&mut self, order: &RetailOrder, fair_price: f64, timestamp: u64) {
        if fair_price <= 0.0 || order.size <= 0.0 {
            return;
        }
        let amount_x = Decimal::from_f64(order.size / fair_price);
        if !amount_x.is_positive() {
            return;
        }

        let traded = if order.side == "buy" {
            self.pool.execute_buy_x(amount_x, timestamp)
        } else {
            self.pool.execute_sell_x(amount_x, timestamp)
        };

        if let Ok(Some(trade)) = traded {
            self.retail_volume_y += trade.trade_info.amount_y.to_f64();
        }
    }

    fn run_arb(&mut self, fair_price: f64, timestamp: u64) {
        if let Some(result) = self.arbitrageur.execute_arb(&mut self.pool, fair_price, timestamp) {
            self.arb_volume_y += result.amount_y;
        }
    }

    fn value_at(&self, fair_price: f64) -> f64 {
        let (rx, ry) = self.pool.reserves();
        let (fx, fy) = self.pool.accumulated_fees();
        (rx.to_f64() + fx.to_f64()) * fair_price + ry.to_f64() + fy.to_f64()
    }
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the submission strategy against the baseline for the configured
    /// number of steps, returning a lightweight chartable result.
    pub fn run(
        &mut self,
        submission: Box<dyn Strategy>,
        baseline: Box<dyn Strategy>,
    ) -> Result<LightweightSimResult, SimulationError> {
        if self.config.n_steps == 0 {
            return Err(SimulationError::InvalidConfig("n_steps must be positive".into()));
        }
        if self.config.initial_x <= 0.0 || self.config.initial_y <= 0.0 {
            return Err(SimulationError::InvalidConfig("initial reserves must be positive".into()));
        }

        let seed = self.config.seed.unwrap_or(0);
        let initial_x = Decimal::from_f64(self.config.initial_x);
        let initial_y = Decimal::from_f64(self.config.initial_y);

        let mut runs = vec![
            PoolRun::new(submission, initial_x, initial_y),
            PoolRun::new(baseline, initial_x, initial_y),
        ];
        for run in &mut runs {
            run.pool.initialize().map_err(|e| SimulationError::Strategy(e.to_string()))?;
        }

        let names: Vec<String> = runs.iter().map(|r| r.name.clone()).collect();
        let initial_reserves: HashMap<String, (f64, f64)> = runs
            .iter()
            .map(|r| {
                let (rx, ry) = r.pool.reserves();
                (r.name.clone(), (rx.to_f64(), ry.to_f64()))
            })
            .collect();

        let mut price_process = GBMPriceProcess::new(
            self.config.initial_price,
            self.config.gbm_mu,
            self.config.gbm_sigma,
            self.config.gbm_dt,
            Some(seed),
        );
        let mut retail_trader = RetailTrader::new(
            self.config.retail_arrival_rate,
            self.config.retail_mean_size,
            self.config.retail_size_sigma,
            self.config.retail_buy_prob,
            Some(seed),
        );

        let initial_fair_price = self.config.initial_price;
        let mut steps = Vec::with_capacity(self.config.n_steps as usize);

        for step in 0..self.config.n_steps {
            let fair_price = price_process.step();
            let timestamp = step as u64;

            for run in &mut runs {
                run.run_arb(fair_price, timestamp);
            }

            let orders = retail_trader.generate_orders();
            for order in &orders {
                for run in &mut runs {
                    run.apply_retail_order(order, fair_price, timestamp);
                }
            }

            steps.push(capture_step(step, fair_price, &runs));
        }

        let final_fair_price = price_process.current_price();
        let initial_value: HashMap<String, f64> = runs
            .iter()
            .map(|r| {
                let (rx, ry) = initial_reserves[&r.name];
                (r.name.clone(), rx * initial_fair_price + ry)
            })
            .collect();

        let mut pnl = HashMap::new();
        let mut edges = HashMap::new();
        let mut arb_volume_y = HashMap::new();
        let mut retail_volume_y = HashMap::new();
        let mut average_fees = HashMap::new();

        for run in &runs {
            let final_value = run.value_at(final_fair_price);
            let start_value = initial_value[&run.name];
            pnl.insert(run.name.clone(), final_value - start_value);
            edges.insert(run.name.clone(), final_value - start_value);
            arb_volume_y.insert(run.name.clone(), run.arb_volume_y);
            retail_volume_y.insert(run.name.clone(), run.retail_volume_y);
            let n = self.config.n_steps as f64;
            average_fees.insert(run.name.clone(), (run.fee_bid_sum / n, run.fee_ask_sum / n));
        }

        Ok(LightweightSimResult {
            seed,
            strategies: names,
            pnl,
            edges,
            initial_fair_price,
            initial_reserves,
            steps,
            arb_volume_y,
            retail_volume_y,
            average_fees,
        })
    }
}

fn capture_step(step: u32, fair_price: f64, runs: &mut [PoolRun]) -> LightweightStepResult {
    let mut spot_prices = HashMap::new();
    let mut pnls = HashMap::new();
    let mut fees = HashMap::new();

    for run in runs.iter_mut() {
        spot_prices.insert(run.name.clone(), run.pool.spot_price().to_f64());
        pnls.insert(run.name.clone(), run.value_at(fair_price));

        let quote = run.pool.fees();
        let bid = quote.bid_fee.to_f64();
        let ask = quote.ask_fee.to_f64();
        run.fee_bid_sum += bid;
        run.fee_ask_sum += ask;
        fees.insert(run.name.clone(), (bid, ask));
    }

    LightweightStepResult { timestamp: step, fair_price, spot_prices, pnls, fees }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::native::{VanillaStrategy, ZeroFeeStrategy};

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            n_steps: 50,
            initial_price: 1.0,
            initial_x: 1_000.0,
            initial_y: 1_000.0,
            gbm_mu: 0.0,
            gbm_sigma: 0.2,
            gbm_dt: 1.0 / (365.0 * 24.0 * 60.0),
            retail_arrival_rate: 2.0,
            retail_mean_size: 10.0,
            retail_size_sigma: 0.5,
            retail_buy_prob: 0.5,
            seed: Some(7),
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        let mut engine_a = SimulationEngine::new(small_config());
        let result_a = engine_a
            .run(Box::new(VanillaStrategy::vanilla_30bps()), Box::new(ZeroFeeStrategy))
            .unwrap();

        let mut engine_b = SimulationEngine::new(small_config());
        let result_b = engine_b
            .run(Box::new(VanillaStrategy::vanilla_30bps()), Box::new(ZeroFeeStrategy))
            .unwrap();

        assert_eq!(result_a.pnl, result_b.pnl);
        assert_eq!(result_a.steps.len(), result_b.steps.len());
    }

    #[test]
    fn rejects_zero_steps() {
        let mut config = small_config();
        config.n_steps = 0;
        let mut engine = SimulationEngine::new(config);
        let result = engine.run(Box::new(ZeroFeeStrategy), Box::new(ZeroFeeStrategy));
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn produces_one_step_per_configured_step() {
        let mut engine = SimulationEngine::new(small_config());
        let result = engine
            .run(Box::new(VanillaStrategy::vanilla_30bps()), Box::new(ZeroFeeStrategy))
            .unwrap();
        assert_eq!(result.steps.len(), 50);
        assert_eq!(result.strategies.len(), 2);
    }
}
