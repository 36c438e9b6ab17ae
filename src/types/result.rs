//! Simulation result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lightweight step result for charting (minimal memory footprint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightweightStepResult {
    /// Simulation step number.
    pub timestamp: u32,

    /// Fair price at this step.
    pub fair_price: f64,

    /// Spot prices by strategy name.
    pub spot_prices: HashMap<String, f64>,

    /// Running PnL by strategy name.
    pub pnls: HashMap<String, f64>,

    /// Fees (bid, ask) by strategy name.
    pub fees: HashMap<String, (f64, f64)>,
}

/// Lightweight simulation result for charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightweightSimResult {
    /// Seed used for this simulation.
    pub seed: u64,

    /// Strategy names.
    pub strategies: Vec<String>,

    /// Final PnL by strategy name.
    pub pnl: HashMap<String, f64>,

    /// Edge by strategy name (sum over trades).
    pub edges: HashMap<String, f64>,

    /// Initial fair price.
    pub initial_fair_price: f64,

    /// Initial reserves by strategy name: (reserve_x, reserve_y).
    pub initial_reserves: HashMap<String, (f64, f64)>,

    /// Step results for charting.
    pub steps: Vec<LightweightStepResult>,

    /// Total arb volume (in Y) by strategy name.
    pub arb_volume_y: HashMap<String, f64>,

    /// Total retail volume (in Y) by strategy name.
    pub retail_volume_y: HashMap<String, f64>,

    /// Average fees (bid, ask) by strategy name over the simulation.
    pub average_fees: HashMap<String, (f64, f64)>,
}

impl LightweightSimResult {
    /// Get the winner of a two-strategy simulation, by edge.
    pub fn winner(&self) -> Option<String> {
        let names: Vec<_> = self.strategies.iter().collect();
        if names.len() != 2 {
            return None;
        }

        let pnl_a = self.pnl.get(names[0]).copied().unwrap_or(0.0);
        let pnl_b = self.pnl.get(names[1]).copied().unwrap_or(0.0);
        let edge_a = self.edges.get(names[0]).copied().unwrap_or(pnl_a);
        let edge_b = self.edges.get(names[1]).copied().unwrap_or(pnl_b);

        if edge_a > edge_b {
            Some(names[0].clone())
        } else if edge_b > edge_a {
            Some(names[1].clone())
        } else {
            None
        }
    }
}

/// Batch result containing all simulation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSimulationResult {
    /// Individual simulation results.
    pub results: Vec<LightweightSimResult>,

    /// Strategy names.
    pub strategies: Vec<String>,
}

impl BatchSimulationResult {
    /// Get win counts: (wins_a, wins_b, draws).
    pub fn win_counts(&self) -> (u32, u32, u32) {
        if self.strategies.len() != 2 {
            return (0, 0, 0);
        }

        let name_a = &self.strategies[0];
        let name_b = &self.strategies[1];

        let mut wins_a = 0u32;
        let mut wins_b = 0u32;
        let mut draws = 0u32;

        for result in &self.results {
            let pnl_a = result.pnl.get(name_a).copied().unwrap_or(0.0);
            let pnl_b = result.pnl.get(name_b).copied().unwrap_or(0.0);
            let edge_a = result.edges.get(name_a).copied().unwrap_or(pnl_a);
            let edge_b = result.edges.get(name_b).copied().unwrap_or(pnl_b);

            if edge_a > edge_b {
                wins_a += 1;
            } else if edge_b > edge_a {
                wins_b += 1;
            } else {
                draws += 1;
            }
        }

        (wins_a, wins_b, draws)
    }

    /// Get total PnL: (total_pnl_a, total_pnl_b).
    pub fn total_pnl(&self) -> (f64, f64) {
        if self.strategies.len() != 2 {
            return (0.0, 0.0);
        }

        let name_a = &self.strategies[0];
        let name_b = &self.strategies[1];

        let mut total_a = 0.0f64;
        let mut total_b = 0.0f64;

        for result in &self.results {
            total_a += result.pnl.get(name_a).copied().unwrap_or(0.0);
            total_b += result.pnl.get(name_b).copied().unwrap_or(0.0);
        }

        (total_a, total_b)
    }

    /// Get the overall winner based on win count.
    pub fn overall_winner(&self) -> Option<String> {
        let (wins_a, wins_b, _) = self.win_counts();
        if wins_a > wins_b {
            Some(self.strategies[0].clone())
        } else if wins_b > wins_a {
            Some(self.strategies[1].clone())
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
