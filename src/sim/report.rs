//! Aggregates a batch of head-to-head simulations into per-strategy
//! statistics: mean/stddev edge, Sharpe ratio, and edge vs. the other
//! strategy in the pair.

use crate::types::result::BatchSimulationResult;

/// Aggregated statistics for one strategy across a batch of seeds.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    pub name: String,
    pub mean_edge: f64,
    pub std_edge: f64,
    pub sharpe: f64,
    /// Mean (this strategy's edge - the other strategy's edge).
    pub edge_vs_other: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Build one `AggregatedResult` per strategy name in `batch`.
pub fn aggregate(batch: &BatchSimulationResult) -> Vec<AggregatedResult> {
    if batch.strategies.len() != 2 || batch.results.is_empty() {
        return batch
            .strategies
            .iter()
            .map(|name| aggregate_one(batch, name))
            .collect();
    }

    let (wins_a, wins_b, draws) = batch.win_counts();
    batch
        .strategies
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut result = aggregate_one(batch, name);
            if i == 0 {
                result.wins = wins_a;
                result.losses = wins_b;
            } else {
                result.wins = wins_b;
                result.losses = wins_a;
            }
            result.draws = draws;
            result
        })
        .collect()
}

fn aggregate_one(batch: &BatchSimulationResult, name: &str) -> AggregatedResult {
    let edges: Vec<f64> = batch
        .results
        .iter()
        .map(|r| r.edges.get(name).copied().unwrap_or(0.0))
        .collect();
    let n = edges.len().max(1) as f64;

    let mean = edges.iter().sum::<f64>() / n;
    let variance = edges.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let other_name = batch.strategies.iter().find(|s| s.as_str() != name);
    let edge_vs_other = if let Some(other) = other_name {
        let other_mean = batch
            .results
            .iter()
            .map(|r| r.edges.get(other).copied().unwrap_or(0.0))
            .sum::<f64>()
            / n;
        mean - other_mean
    } else {
        0.0
    };

    AggregatedResult {
        name: name.to_string(),
        mean_edge: mean,
        std_edge: std,
        sharpe: if std > 0.0 { mean / std } else { 0.0 },
        edge_vs_other,
        wins: 0,
        losses: 0,
        draws: 0,
    }
}
