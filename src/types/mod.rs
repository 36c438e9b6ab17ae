//! Core types for the simulation engine.

pub mod config;
pub mod decimal;
pub mod fee_quote;
pub mod result;
pub mod trade_info;
pub mod wad;

pub use config::SimulationConfig;
pub use decimal::Decimal;
pub use fee_quote::FeeQuote;
pub use result::{BatchSimulationResult, LightweightSimResult, LightweightStepResult};
pub use trade_info::{Side, TradeInfo};
pub use wad::Wad;
