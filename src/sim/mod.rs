//! Head-to-head simulation: per-seed engine, parallel batch runner, and
//! report aggregation.

pub mod engine;
pub mod report;
pub mod runner;

pub use engine::{SimulationEngine, SimulationError};
pub use report::{aggregate, AggregatedResult};
pub use runner::{run_simulation, run_simulations_parallel, SimulationBatchConfig};
