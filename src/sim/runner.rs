//! Rayon-parallel batch runner: replays the same submission/baseline pair
//! across many seeds and collects one `LightweightSimResult` per seed.

use rayon::prelude::*;

use crate::adapter::EvmStrategyAdapter;
use crate::sandbox::SandboxError;
use crate::sim::engine::{SimulationEngine, SimulationError};
use crate::strategy::contract::Strategy;
use crate::types::config::SimulationConfig;
use crate::types::result::{BatchSimulationResult, LightweightSimResult};

/// Configuration for a batch of head-to-head simulations.
pub struct SimulationBatchConfig {
    pub submission_bytecode: Vec<u8>,
    pub baseline_bytecode: Vec<u8>,
    pub configs: Vec<SimulationConfig>,
    pub n_workers: Option<usize>,
}

/// Run one simulation, deploying fresh strategy instances (a deployed EVM
/// strategy carries mutable storage state, so each seed gets its own).
pub fn run_simulation(
    submission_bytecode: &[u8],
    baseline_bytecode: &[u8],
    config: SimulationConfig,
) -> Result<LightweightSimResult, SandboxError> {
    let submission: Box<dyn Strategy> = Box::new(EvmStrategyAdapter::new(submission_bytecode.to_vec())?);
    let baseline: Box<dyn Strategy> = Box::new(EvmStrategyAdapter::new(baseline_bytecode.to_vec())?);

    let mut engine = SimulationEngine::new(config);
    engine
        .run(submission, baseline)
        .map_err(|e| SandboxError::ExecutionFailed(e.to_string()))
}

/// Run `batch.configs` in parallel, one simulation per seed config.
pub fn run_simulations_parallel(batch: SimulationBatchConfig) -> Result<BatchSimulationResult, SimulationError> {
    let n_workers = batch.n_workers.unwrap_or_else(|| rayon::current_num_threads().min(8));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .build()
        .map_err(|e| SimulationError::InvalidConfig(e.to_string()))?;

    let submission_bytecode = &batch.submission_bytecode;
    let baseline_bytecode = &batch.baseline_bytecode;

    let results: Vec<LightweightSimResult> = pool.install(|| {
        batch
            .configs
            .into_par_iter()
            .map(|config| {
                run_simulation(submission_bytecode, baseline_bytecode, config)
                    .map_err(|e| SimulationError::Strategy(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let strategies = results
        .first()
        .map(|r| r.strategies.clone())
        .unwrap_or_default();

    Ok(BatchSimulationResult { results, strategies })
}
