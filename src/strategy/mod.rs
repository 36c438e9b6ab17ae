//! Strategy contract: the interface fee strategies implement, plus native
//! reference implementations for testing.

pub mod contract;
pub mod native;

pub use contract::{Strategy, StrategyError};
