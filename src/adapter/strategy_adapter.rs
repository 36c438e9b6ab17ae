//! Adapts a sandboxed EVM strategy to the native `Strategy` trait.
//!
//! Fee values returned by a strategy are clamped to `[0, MAX_FEE]` (10%)
//! before being handed to the pool — a strategy returning a negative or
//! wildly large fee doesn't get to break the pool's accounting, it just
//! gets clamped to the nearest legal value. Magnitudes too large to decode
//! at all (outside ~2^128) are rejected by the sandbox's ABI decode and
//! surface here as an error rather than a clamp.

use crate::sandbox::executor::SandboxExecutor;
use crate::sandbox::error::SandboxError;
use crate::strategy::contract::{Strategy, StrategyError};
use crate::types::trade_info::TradeInfo;
use crate::types::wad::Wad;

/// Wraps a `SandboxExecutor` so it can sit inside a `Pool`.
pub struct EvmStrategyAdapter {
    executor: SandboxExecutor,
}

impl EvmStrategyAdapter {
    pub fn new(creation_bytecode: Vec<u8>) -> Result<Self, SandboxError> {
        let executor = SandboxExecutor::new(creation_bytecode)?;
        Ok(Self { executor })
    }
}

impl Strategy for EvmStrategyAdapter {
    fn after_initialize(&mut self, initial_x: Wad, initial_y: Wad) -> Result<(Wad, Wad), StrategyError> {
        let (bid, ask) = self
            .executor
            .after_initialize(initial_x, initial_y)
            .map_err(|e| StrategyError::other(e.to_string()))?;
        Ok((bid.clamp_fee(), ask.clamp_fee()))
    }

    fn after_swap(&mut self, trade: &TradeInfo) -> Result<(Wad, Wad), StrategyError> {
        let (bid, ask) = self
            .executor
            .after_swap(trade)
            .map_err(|e| StrategyError::other(e.to_string()))?;
        Ok((bid.clamp_fee(), ask.clamp_fee()))
    }

    fn name(&self) -> &str {
        self.executor.name()
    }
}

#[cfg(test)]
mod tests {
    // Full tests require deployable EVM bytecode — see tests/sandbox_tests.rs.
}
