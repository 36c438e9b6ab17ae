//! Native (non-EVM) reference strategies used for engine-level testing
//! without paying the sandbox deployment cost.
//!
//! These are test support, not part of the competition's own attack
//! surface — real submissions always go through `adapter::EvmStrategyAdapter`.

use crate::strategy::contract::{Strategy, StrategyError};
use crate::types::trade_info::TradeInfo;
use crate::types::wad::Wad;

/// Always quotes zero fees.
pub struct ZeroFeeStrategy;

impl Strategy for ZeroFeeStrategy {
    fn after_initialize(&mut self, _initial_x: Wad, _initial_y: Wad) -> Result<(Wad, Wad), StrategyError> {
        Ok((Wad::zero(), Wad::zero()))
    }

    fn after_swap(&mut self, _trade: &TradeInfo) -> Result<(Wad, Wad), StrategyError> {
        Ok((Wad::zero(), Wad::zero()))
    }

    fn name(&self) -> &str {
        "ZeroFee"
    }
}

/// A flat fee on both sides, e.g. the Uniswap V2-style 30 bps baseline.
pub struct VanillaStrategy {
    fee: Wad,
}

impl VanillaStrategy {
    pub fn new(fee_bps: i128) -> Self {
        Self { fee: Wad::from_bps(fee_bps) }
    }

    pub fn vanilla_30bps() -> Self {
        Self::new(30)
    }
}

impl Strategy for VanillaStrategy {
    fn after_initialize(&mut self, _initial_x: Wad, _initial_y: Wad) -> Result<(Wad, Wad), StrategyError> {
        Ok((self.fee, self.fee))
    }

    fn after_swap(&mut self, _trade: &TradeInfo) -> Result<(Wad, Wad), StrategyError> {
        Ok((self.fee, self.fee))
    }

    fn name(&self) -> &str {
        "Vanilla_30bps"
    }
}
