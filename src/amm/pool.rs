//! Constant Function Market Maker (x * y = k) driven by a pluggable fee
//! strategy.
//!
//! Fees are collected into separate buckets rather than being reinvested
//! into liquidity (the Uniswap V3/V4 fee model): fees count toward PnL but
//! never inflate `k`. All reserve/amount/fee arithmetic is fixed-point
//! `Decimal` — no floating point in this accounting path.
//!
//! Operation names are from the *trader's* perspective: `execute_buy_x`
//! means the trader buys X from the pool (pool sells X); `execute_sell_x`
//! means the trader sells X to the pool (pool buys X).

use crate::amm::error::PoolError;
use crate::strategy::contract::Strategy;
use crate::types::decimal::Decimal;
use crate::types::fee_quote::FeeQuote;
use crate::types::trade_info::TradeInfo;
use crate::types::wad::Wad;

fn decimal_to_wad(d: Decimal) -> Wad {
    Wad::new(d.raw())
}

fn wad_to_decimal(w: Wad) -> Decimal {
    Decimal::new(w.raw())
}

/// Quote for a trader buying X from the pool.
#[derive(Debug, Clone, Copy)]
pub struct BuyQuote {
    /// Amount of Y the trader must pay in (gross, including fee).
    pub amount_in: Decimal,
    pub fee_rate: Decimal,
    pub fee_amount: Decimal,
}

/// Quote for a trader selling X to the pool.
#[derive(Debug, Clone, Copy)]
pub struct SellQuote {
    /// Amount of Y the trader receives (net, after fee).
    pub amount_out: Decimal,
    pub fee_rate: Decimal,
    pub fee_amount: Decimal,
}

/// Result of an executed trade.
#[derive(Debug, Clone)]
pub struct TradeResult {
    pub trade_info: TradeInfo,
    pub fee_amount: Decimal,
}

fn wad_rate_to_decimal(fee: Wad) -> Decimal {
    Decimal::new(fee.raw())
}

/// A constant-product pool paired with one fee strategy.
pub struct Pool {
    pub name: String,
    strategy: Box<dyn Strategy>,
    reserve_x: Decimal,
    reserve_y: Decimal,
    current_fees: FeeQuote,
    initialized: bool,
    accumulated_fees_x: Decimal,
    accumulated_fees_y: Decimal,
}

impl Pool {
    /// Create a new pool with the given strategy and starting reserves.
    /// The pool is not yet initialized — call `initialize` before trading.
    pub fn new(strategy: Box<dyn Strategy>, reserve_x: Decimal, reserve_y: Decimal) -> Self {
        let name = strategy.name().to_string();
        Self {
            name,
            strategy,
            reserve_x,
            reserve_y,
            current_fees: FeeQuote::symmetric(Wad::from_bps(30)),
            initialized: false,
            accumulated_fees_x: Decimal::zero(),
            accumulated_fees_y: Decimal::zero(),
        }
    }

    /// Initialize the pool and fetch starting fees from the strategy.
    pub fn initialize(&mut self) -> Result<(), PoolError> {
        if self.initialized {
            return Err(PoolError::AlreadyInitialized);
        }

        let initial_x = decimal_to_wad(self.reserve_x);
        let initial_y = decimal_to_wad(self.reserve_y);

        let (bid_fee, ask_fee) = self
            .strategy
            .after_initialize(initial_x, initial_y)
            .map_err(|e| PoolError::Strategy(e.to_string()))?;

        self.current_fees = FeeQuote::new(bid_fee.clamp_fee(), ask_fee.clamp_fee());
        self.initialized = true;
        Ok(())
    }

    pub fn reserves(&self) -> (Decimal, Decimal) {
        (self.reserve_x, self.reserve_y)
    }

    pub fn spot_price(&self) -> Decimal {
        if self.reserve_x.is_zero() {
            return Decimal::zero();
        }
        self.reserve_y.div(self.reserve_x)
    }

    pub fn k(&self) -> Decimal {
        self.reserve_x.mul(self.reserve_y)
    }

    pub fn fees(&self) -> FeeQuote {
        self.current_fees
    }

    pub fn accumulated_fees(&self) -> (Decimal, Decimal) {
        (self.accumulated_fees_x, self.accumulated_fees_y)
    }

    /// Quote a trade where the trader buys `amount_x` of X from the pool
    /// (the pool sells X). Returns `Ok(None)` if the trade is unsatisfiable
    /// (e.g. `amount_x` at or beyond the pool's X reserves).
    pub fn get_quote_buy_x(&self, amount_x: Decimal) -> Result<Option<BuyQuote>, PoolError> {
        if !self.initialized {
            return Err(PoolError::NotInitialized);
        }
        let quote = self.quote_pool_sells_x(amount_x);
        Ok(quote.amount_in.is_positive().then_some(quote))
    }

    /// Quote a trade where the trader sells `amount_x` of X to the pool
    /// (the pool buys X). Returns `Ok(None)` if the trade is unsatisfiable.
    pub fn get_quote_sell_x(&self, amount_x: Decimal) -> Result<Option<SellQuote>, PoolError> {
        if !self.initialized {
            return Err(PoolError::NotInitialized);
        }
        let quote = self.quote_pool_buys_x(amount_x);
        Ok(quote.amount_out.is_positive().then_some(quote))
    }

    /// Execute a trade where the trader buys `amount_x` of X (pool sells X).
    /// Returns `Ok(None)` if the trade is unsatisfiable (e.g. zero/invalid
    /// amount), and only errors if the pool isn't initialized.
    pub fn execute_buy_x(&mut self, amount_x: Decimal, timestamp: u64) -> Result<Option<TradeResult>, PoolError> {
        if !self.initialized {
            return Err(PoolError::NotInitialized);
        }

        let quote = self.quote_pool_sells_x(amount_x);
        if !quote.amount_in.is_positive() {
            return Ok(None);
        }

        let net_y = quote.amount_in - quote.fee_amount;
        self.reserve_x -= amount_x;
        self.reserve_y += net_y;
        self.accumulated_fees_y += quote.fee_amount;

        let trade_info = TradeInfo::new(
            false, // pool sold X
            decimal_to_wad(amount_x),
            decimal_to_wad(quote.amount_in),
            timestamp,
            decimal_to_wad(self.reserve_x),
            decimal_to_wad(self.reserve_y),
        );

        self.update_fees(&trade_info);

        Ok(Some(TradeResult {
            trade_info,
            fee_amount: quote.fee_amount,
        }))
    }

    /// Execute a trade where the trader sells `amount_x` of X (pool buys X).
    pub fn execute_sell_x(&mut self, amount_x: Decimal, timestamp: u64) -> Result<Option<TradeResult>, PoolError> {
        if !self.initialized {
            return Err(PoolError::NotInitialized);
        }

        let quote = self.quote_pool_buys_x(amount_x);
        if !quote.amount_out.is_positive() {
            return Ok(None);
        }

        let net_x = amount_x - quote.fee_amount;
        self.reserve_x += net_x;
        self.accumulated_fees_x += quote.fee_amount;
        self.reserve_y -= quote.amount_out;

        let trade_info = TradeInfo::new(
            true, // pool bought X
            decimal_to_wad(amount_x),
            decimal_to_wad(quote.amount_out),
            timestamp,
            decimal_to_wad(self.reserve_x),
            decimal_to_wad(self.reserve_y),
        );

        self.update_fees(&trade_info);

        Ok(Some(TradeResult {
            trade_info,
            fee_amount: quote.fee_amount,
        }))
    }

    /// The pool sells `amount_x` of X to a trader; trader pays in Y.
    fn quote_pool_sells_x(&self, amount_x: Decimal) -> BuyQuote {
        if !amount_x.is_positive() || amount_x >= self.reserve_x {
            return BuyQuote { amount_in: Decimal::zero(), fee_rate: Decimal::zero(), fee_amount: Decimal::zero() };
        }

        let fee = wad_rate_to_decimal(self.current_fees.ask_fee);
        let gamma = (Decimal::one() - fee).clamp(Decimal::zero(), Decimal::one());
        if !gamma.is_positive() {
            return BuyQuote { amount_in: Decimal::zero(), fee_rate: fee, fee_amount: Decimal::zero() };
        }

        let k = self.k();
        let new_rx = self.reserve_x - amount_x;
        let new_ry = k.div(new_rx);
        let net_y = new_ry - self.reserve_y;

        if !net_y.is_positive() {
            return BuyQuote { amount_in: Decimal::zero(), fee_rate: fee, fee_amount: Decimal::zero() };
        }

        let total_y = net_y.div(gamma);
        BuyQuote { amount_in: total_y, fee_rate: fee, fee_amount: total_y - net_y }
    }

    /// The pool buys `amount_x` of X from a trader; trader receives Y.
    fn quote_pool_buys_x(&self, amount_x: Decimal) -> SellQuote {
        if !amount_x.is_positive() {
            return SellQuote { amount_out: Decimal::zero(), fee_rate: Decimal::zero(), fee_amount: Decimal::zero() };
        }

        let fee = wad_rate_to_decimal(self.current_fees.bid_fee);
        let gamma = (Decimal::one() - fee).clamp(Decimal::zero(), Decimal::one());
        if !gamma.is_positive() {
            return SellQuote { amount_out: Decimal::zero(), fee_rate: fee, fee_amount: Decimal::zero() };
        }

        let net_x = amount_x.mul(gamma);
        let k = self.k();
        let new_rx = self.reserve_x + net_x;
        let new_ry = k.div(new_rx);
        let y_out = self.reserve_y - new_ry;

        if !y_out.is_positive() {
            return SellQuote { amount_out: Decimal::zero(), fee_rate: fee, fee_amount: Decimal::zero() };
        }

        SellQuote { amount_out: y_out, fee_rate: fee, fee_amount: amount_x.mul(fee) }
    }

    fn update_fees(&mut self, trade_info: &TradeInfo) {
        if let Ok((bid_fee, ask_fee)) = self.strategy.after_swap(trade_info) {
            self.current_fees = FeeQuote::new(bid_fee.clamp_fee(), ask_fee.clamp_fee());
        } else {
            tracing::warn!(pool = %self.name, "afterSwap failed, keeping previous fee quote");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::native::{VanillaStrategy, ZeroFeeStrategy};

    fn init_pool(strategy: Box<dyn Strategy>) -> Pool {
        let mut pool = Pool::new(strategy, Decimal::from_i64(1000), Decimal::from_i64(1000));
        pool.initialize().unwrap();
        pool
    }

    #[test]
    fn uninitialized_quote_errors() {
        let pool = Pool::new(Box::new(ZeroFeeStrategy), Decimal::from_i64(100), Decimal::from_i64(100));
        assert!(matches!(pool.get_quote_buy_x(Decimal::from_i64(1)), Err(PoolError::NotInitialized)));
    }

    #[test]
    fn double_initialize_errors() {
        let mut pool = init_pool(Box::new(ZeroFeeStrategy));
        assert!(matches!(pool.initialize(), Err(PoolError::AlreadyInitialized)));
    }

    #[test]
    fn zero_fee_buy_then_sell_round_trips_k() {
        let mut pool = init_pool(Box::new(ZeroFeeStrategy));
        let k_before = pool.k();

        let result = pool.execute_buy_x(Decimal::from_i64(10), 0).unwrap().unwrap();
        assert!(result.trade_info.amount_y.to_f64() > 0.0);

        let (rx, ry) = pool.reserves();
        let k_after = rx.mul(ry);
        // k is invariant under a zero-fee trade (up to fixed-point rounding).
        assert!((k_after.to_f64() - k_before.to_f64()).abs() / k_before.to_f64() < 1e-9);
    }

    #[test]
    fn buy_decreases_reserve_x() {
        let mut pool = init_pool(Box::new(ZeroFeeStrategy));
        pool.execute_buy_x(Decimal::from_i64(10), 0).unwrap();
        let (rx, _) = pool.reserves();
        assert_eq!(rx, Decimal::from_i64(990));
    }

    #[test]
    fn sell_increases_reserve_x() {
        let mut pool = init_pool(Box::new(ZeroFeeStrategy));
        pool.execute_sell_x(Decimal::from_i64(10), 0).unwrap();
        let (rx, _) = pool.reserves();
        assert_eq!(rx, Decimal::from_i64(1010));
    }

    #[test]
    fn fees_accumulate_separately_from_reserves() {
        let mut pool = init_pool(Box::new(VanillaStrategy::vanilla_30bps()));
        pool.execute_buy_x(Decimal::from_i64(10), 0).unwrap();
        let (fees_x, fees_y) = pool.accumulated_fees();
        assert!(fees_x.is_zero());
        assert!(fees_y.is_positive());
    }

    #[test]
    fn unsatisfiable_trade_soft_fails() {
        let mut pool = init_pool(Box::new(ZeroFeeStrategy));
        // Selling the entire X reserve to buy leaves nothing in the pool.
        let result = pool.execute_buy_x(Decimal::from_i64(1000), 0).unwrap();
        assert!(result.is_none());
    }
}
