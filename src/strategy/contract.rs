//! The strategy contract: the interface every fee strategy implements,
//! whether EVM-sandboxed or a native test double.

use crate::types::trade_info::TradeInfo;
use crate::types::wad::Wad;

/// Error raised by a strategy's `afterInitialize`/`afterSwap`/`getName` call.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("{0}")]
    Other(String),
}

impl StrategyError {
    pub fn other(msg: impl Into<String>) -> Self {
        StrategyError::Other(msg.into())
    }
}

/// A fee strategy: decides bid/ask fees at pool initialization and after
/// every swap. Object-safe so a `Pool` can hold either an EVM-sandboxed
/// adapter or a native reference implementation without a generic leaking
/// into simulation/runner code.
pub trait Strategy {
    /// Called once when the pool is initialized with its starting reserves.
    /// Returns (bid_fee, ask_fee) in WAD.
    fn after_initialize(&mut self, initial_x: Wad, initial_y: Wad) -> Result<(Wad, Wad), StrategyError>;

    /// Called after every executed trade. Returns (bid_fee, ask_fee) in WAD.
    fn after_swap(&mut self, trade: &TradeInfo) -> Result<(Wad, Wad), StrategyError>;

    /// The strategy's self-reported name.
    fn name(&self) -> &str;
}
