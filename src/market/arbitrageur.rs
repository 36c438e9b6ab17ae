//! Arbitrageur logic for extracting profit from a mispriced pool.
//!
//! Uses closed-form solutions for constant-product AMMs. For reserves
//! `(x, y)`, `k = x*y`, fee `f` (fee-on-input), `gamma = 1 - f`, and fair
//! price `p` (Y per X):
//! - Trader buys X from the pool: `Δx_out = x - sqrt(k / (gamma * p))`
//!   (profit-maximizing).
//! - Trader sells X to the pool: `Δx_in = (sqrt(k * gamma / p) - x) / gamma`
//!   (profit-maximizing, `Δx_in` is gross input).
//!
//! All arithmetic here stays in `f64` — this is market-flow generation, not
//! the accounting core the fixed-decimal requirement binds.

use crate::amm::Pool;

/// Result of an arbitrage attempt.
#[derive(Debug, Clone)]
pub struct ArbResult {
    pub pool_name: String,
    pub profit: f64,
    /// Side from the trader's perspective: "buy" or "sell".
    pub side: &'static str,
    pub amount_x: f64,
    pub amount_y: f64,
}

/// Extracts profit from a mispriced pool using closed-form optimal sizing.
pub struct Arbitrageur;

impl Arbitrageur {
    pub fn new() -> Self {
        Self
    }

    /// Find and execute the optimal arbitrage trade against `pool`.
    pub fn execute_arb(&self, pool: &mut Pool, fair_price: f64, timestamp: u64) -> Option<ArbResult> {
        let (rx, ry) = pool.reserves();
        let (rx, ry) = (rx.to_f64(), ry.to_f64());
        let spot_price = ry / rx;

        if spot_price < fair_price {
            // Pool underprices X — trader buys X from the pool.
            self.compute_buy_arb(pool, rx, ry, fair_price, timestamp)
        } else if spot_price > fair_price {
            // Pool overprices X — trader sells X to the pool.
            self.compute_sell_arb(pool, rx, ry, fair_price, timestamp)
        } else {
            None
        }
    }

    /// Trader buys X from the pool. Maximize `profit = Δx * p - Y_paid`.
    fn compute_buy_arb(&self, pool: &mut Pool, rx: f64, ry: f64, fair_price: f64, timestamp: u64) -> Option<ArbResult> {
        let k = rx * ry;
        let fee = pool.fees().ask_fee.to_f64();
        let gamma = 1.0 - fee;

        if gamma <= 0.0 || fair_price <= 0.0 {
            return None;
        }

        let new_x = (k / (gamma * fair_price)).sqrt();
        let amount_x = rx - new_x;
        if amount_x <= 0.0 {
            return None;
        }

        // Cap at 99% of reserves.
        let amount_x = amount_x.min(rx * 0.99);

        let quote = pool.get_quote_buy_x(crate::types::decimal::Decimal::from_f64(amount_x)).ok()??;
        let total_y = quote.amount_in.to_f64();

        let profit = amount_x * fair_price - total_y;
        if profit <= 0.0 {
            return None;
        }

        let _trade = pool.execute_buy_x(crate::types::decimal::Decimal::from_f64(amount_x), timestamp).ok()??;

        Some(ArbResult {
            pool_name: pool.name.clone(),
            profit,
            side: "buy",
            amount_x,
            amount_y: total_y,
        })
    }

    /// Trader sells X to the pool. Maximize `profit = Y_received - Δx * p`.
    fn compute_sell_arb(&self, pool: &mut Pool, rx: f64, ry: f64, fair_price: f64, timestamp: u64) -> Option<ArbResult> {
        let k = rx * ry;
        let fee = pool.fees().bid_fee.to_f64();
        let gamma = 1.0 - fee;

        if gamma <= 0.0 || fair_price <= 0.0 {
            return None;
        }

        // x + gamma * Δx_in = sqrt(k * gamma / p)  =>  Δx_in = (sqrt(k*gamma/p) - x) / gamma
        let x_virtual = (k * gamma / fair_price).sqrt();
        let amount_x = (x_virtual - rx) / gamma;
        if amount_x <= 0.0 {
            return None;
        }

        let quote = pool.get_quote_sell_x(crate::types::decimal::Decimal::from_f64(amount_x)).ok()??;
        let y_out = quote.amount_out.to_f64();

        let profit = y_out - amount_x * fair_price;
        if profit <= 0.0 {
            return None;
        }

        let _trade = pool.execute_sell_x(crate::types::decimal::Decimal::from_f64(amount_x), timestamp).ok()??;

        Some(ArbResult {
            pool_name: pool.name.clone(),
            profit,
            side: "sell",
            amount_x,
            amount_y: y_out,
        })
    }
}

impl Default for Arbitrageur {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_buy_x(reserve_x: f64, reserve_y: f64, fee: f64, amount_x_in: f64) -> f64 {
        if amount_x_in <= 0.0 {
            return 0.0;
        }
        let gamma = 1.0 - fee;
        if gamma <= 0.0 {
            return 0.0;
        }
        let k = reserve_x * reserve_y;
        let new_rx = reserve_x + amount_x_in * gamma;
        let new_ry = k / new_rx;
        reserve_y - new_ry
    }

    fn quote_sell_x(reserve_x: f64, reserve_y: f64, fee: f64, amount_x_out: f64) -> f64 {
        if amount_x_out <= 0.0 || amount_x_out >= reserve_x {
            return 0.0;
        }
        let gamma = 1.0 - fee;
        if gamma <= 0.0 {
            return 0.0;
        }
        let k = reserve_x * reserve_y;
        let new_rx = reserve_x - amount_x_out;
        let new_ry = k / new_rx;
        let net_y = new_ry - reserve_y;
        if net_y <= 0.0 {
            return 0.0;
        }
        net_y / gamma
    }

    #[test]
    fn arb_formulas_pick_correct_direction() {
        let rx = 1000.0;
        let ry = 1000.0;
        let k = rx * ry;
        let fee = 0.0025;
        let gamma = 1.0 - fee;

        let fair_price = 1.1;
        let new_x = (k / (gamma * fair_price)).sqrt();
        assert!(rx - new_x > 0.0);

        let fair_price = 0.9;
        let x_virtual = (k * gamma / fair_price).sqrt();
        assert!((x_virtual - rx) / gamma > 0.0);
    }

    #[test]
    fn arb_sizes_maximize_profit() {
        let rx = 1000.0;
        let ry = 1000.0;
        let k = rx * ry;
        let fee = 0.05;
        let gamma = 1.0 - fee;

        let fair_price = 1.2;
        let x_out_opt = rx - (k / (gamma * fair_price)).sqrt();
        assert!(x_out_opt > 0.0 && x_out_opt < rx);
        let y_in_opt = quote_sell_x(rx, ry, fee, x_out_opt);
        let profit_opt = x_out_opt * fair_price - y_in_opt;

        let profit_lo = (x_out_opt * 0.999) * fair_price - quote_sell_x(rx, ry, fee, x_out_opt * 0.999);
        let profit_hi = (x_out_opt * 1.001) * fair_price - quote_sell_x(rx, ry, fee, x_out_opt * 1.001);
        assert!(profit_opt >= profit_lo - 1e-9);
        assert!(profit_opt >= profit_hi - 1e-9);

        let fair_price = 0.9;
        let x_virtual = (k * gamma / fair_price).sqrt();
        let x_in_opt = (x_virtual - rx) / gamma;
        assert!(x_in_opt > 0.0);
        let y_out_opt = quote_buy_x(rx, ry, fee, x_in_opt);
        let profit_opt = y_out_opt - x_in_opt * fair_price;

        let profit_lo = quote_buy_x(rx, ry, fee, x_in_opt * 0.999) - (x_in_opt * 0.999) * fair_price;
        let profit_hi = quote_buy_x(rx, ry, fee, x_in_opt * 1.001) - (x_in_opt * 1.001) * fair_price;
        assert!(profit_opt >= profit_lo - 1e-9);
        assert!(profit_opt >= profit_hi - 1e-9);
    }

    #[test]
    fn execute_arb_trades_against_a_real_pool() {
        use crate::strategy::native::VanillaStrategy;
        use crate::types::decimal::Decimal;

        let mut pool = Pool::new(Box::new(VanillaStrategy::vanilla_30bps()), Decimal::from_i64(1000), Decimal::from_i64(1000));
        pool.initialize().unwrap();

        let arb = Arbitrageur::new();
        let result = arb.execute_arb(&mut pool, 1.2, 0);
        assert!(result.is_some());
        let result = result.unwrap();
        assert_eq!(result.side, "buy");
        assert!(result.profit > 0.0);
    }
}
