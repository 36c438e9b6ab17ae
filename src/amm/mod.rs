//! Constant-product AMM engine.

pub mod error;
pub mod pool;

pub use error::PoolError;
pub use pool::{BuyQuote, Pool, SellQuote, TradeResult};
