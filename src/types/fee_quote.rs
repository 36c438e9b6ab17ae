//! Fee quote returned by a strategy after `afterInitialize`/`afterSwap`.

use crate::types::wad::Wad;

/// A strategy's current bid/ask fee rates, in WAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    /// Fee charged when the AMM buys X (trader sells X to the pool).
    pub bid_fee: Wad,
    /// Fee charged when the AMM sells X (trader buys X from the pool).
    pub ask_fee: Wad,
}

impl FeeQuote {
    pub fn new(bid_fee: Wad, ask_fee: Wad) -> Self {
        Self { bid_fee, ask_fee }
    }

    pub fn symmetric(fee: Wad) -> Self {
        Self { bid_fee: fee, ask_fee: fee }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_sets_both_sides() {
        let q = FeeQuote::symmetric(Wad::from_bps(30));
        assert_eq!(q.bid_fee, q.ask_fee);
    }
}
