//! Fixed-point decimal arithmetic (18 fractional digits) for AMM accounting.
//!
//! Reserves, trade amounts, and prices in the accounting core never touch
//! `f64` — `i128` carries about 38 significant decimal digits, comfortably
//! above the floor this type is held to, with 18 of them reserved for the
//! fractional part. The raw value itself always fits `i128`; the fixed-point
//! ops below widen through `U256` only for the `a * b` intermediate, which
//! at 18-decimal scale overflows `i128` for any pair of reserve-sized
//! operands.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use revm::primitives::U256;

/// Scale constant (1e18).
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// Computes `(a * b) / denom`, widening the product through `U256` so it
/// never overflows `i128` even when both operands are near `i128::MAX`.
/// Truncates toward zero, matching `i128`'s own division.
fn mul_div(a: i128, b: i128, denom: i128) -> i128 {
    let sign = if (a < 0) != (b < 0) { -1i128 } else { 1i128 };
    let sign = if denom < 0 { -sign } else { sign };

    let product = U256::from(a.unsigned_abs()) * U256::from(b.unsigned_abs());
    let quotient = product / U256::from(denom.unsigned_abs());

    let quotient: u128 = quotient.try_into().expect("fixed-point result overflows i128");
    sign * quotient as i128
}

/// Signed fixed-point number with 18 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Decimal(pub i128);

impl Decimal {
    #[inline]
    pub const fn new(raw: i128) -> Self {
        Decimal(raw)
    }

    #[inline]
    pub const fn zero() -> Self {
        Decimal(0)
    }

    #[inline]
    pub const fn one() -> Self {
        Decimal(SCALE)
    }

    #[inline]
    pub fn from_i64(value: i64) -> Self {
        Decimal(value as i128 * SCALE)
    }

    /// Construct from an f64. Only legitimate at the boundary where a
    /// floating-point market-flow quantity (GBM price, retail order size)
    /// enters the accounting core.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Decimal((value * SCALE as f64).round() as i128)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    #[inline]
    pub const fn raw(self) -> i128 {
        self.0
    }

    /// Fixed-point multiplication: (a * b) / SCALE.
    #[inline]
    pub fn mul(self, other: Decimal) -> Decimal {
        Decimal(mul_div(self.0, other.0, SCALE))
    }

    /// Fixed-point division: (a * SCALE) / b.
    #[inline]
    pub fn div(self, other: Decimal) -> Decimal {
        if other.0 == 0 {
            return Decimal(0);
        }
        Decimal(mul_div(self.0, SCALE, other.0))
    }

    /// Integer square root of `self`, scaled back up by `SCALE` (Newton's
    /// method). `self.0 * SCALE` is computed in `U256` since it overflows
    /// `i128` for any `self` above roughly 170.
    #[inline]
    pub fn sqrt(self) -> Decimal {
        if self.0 <= 0 {
            return Decimal(0);
        }
        let scaled = U256::from(self.0 as u128) * U256::from(SCALE as u128);
        let mut x = scaled;
        let mut y = (x + U256::from(1u8)) / U256::from(2u8);
        while y < x {
            x = y;
            y = (x + scaled / x) / U256::from(2u8);
        }
        let result: u128 = x.try_into().expect("sqrt result overflows i128");
        Decimal(result as i128)
    }

    #[inline]
    pub fn abs(self) -> Decimal {
        Decimal(self.0.abs())
    }

    #[inline]
    pub fn clamp(self, min: Decimal, max: Decimal) -> Decimal {
        Decimal(self.0.max(min.0).min(max.0))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Decimal {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Decimal(self.0 + other.0)
    }
}

impl AddAssign for Decimal {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Decimal {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Decimal(self.0 - other.0)
    }
}

impl SubAssign for Decimal {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul for Decimal {
    type Output = Self;
    /// Regular multiplication (scales by SCALE twice). Use `mul` for the
    /// fixed-point-aware operation.
    #[inline]
    fn mul(self, other: Self) -> Self {
        Decimal(self.0 * other.0)
    }
}

impl Div for Decimal {
    type Output = Self;
    /// Regular division. Use `div` for the fixed-point-aware operation.
    #[inline]
    fn div(self, other: Self) -> Self {
        Decimal(self.0 / other.0)
    }
}

impl Neg for Decimal {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Decimal(-self.0)
    }
}

impl From<i128> for Decimal {
    fn from(value: i128) -> Self {
        Decimal(value)
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Decimal::from_f64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_roundtrip() {
        let d = Decimal::from_f64(1.5);
        assert!((d.to_f64() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn fixed_point_mul_div() {
        let a = Decimal::from_i64(6);
        let b = Decimal::from_i64(2);
        assert_eq!(a.div(b), Decimal::from_i64(3));
        assert_eq!(Decimal::from_i64(3).mul(b), Decimal::from_i64(6));
    }

    #[test]
    fn sqrt_matches_known_values() {
        let s = Decimal::from_i64(4).sqrt();
        assert!((s.to_f64() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn clamp_bounds() {
        let v = Decimal::from_i64(100);
        let clamped = v.clamp(Decimal::zero(), Decimal::from_i64(10));
        assert_eq!(clamped, Decimal::from_i64(10));
    }

    #[test]
    fn mul_div_at_reserve_scale_does_not_overflow() {
        // raw values here are ~1e22/1e24 — `self.0 * other.0` alone would be
        // ~1e46, past i128::MAX (~1.7e38).
        let x = Decimal::from_i64(10_000);
        let y = Decimal::from_i64(1_000_000);
        let k = x.mul(y);
        assert!((k.to_f64() - 10_000_000_000.0).abs() < 1.0);
        assert_eq!(k.div(x), y);
    }

    #[test]
    fn sqrt_at_reserve_scale_does_not_overflow() {
        let k = Decimal::from_i64(10_000).mul(Decimal::from_i64(1_000_000));
        let s = k.sqrt();
        assert!((s.to_f64() - 100_000.0).abs() < 1e-3);
    }

    #[test]
    fn mul_div_respect_sign() {
        let a = Decimal::from_i64(-6);
        let b = Decimal::from_i64(2);
        assert_eq!(a.mul(b), Decimal::from_i64(-12));
        assert_eq!(a.div(b), Decimal::from_i64(-3));
        assert_eq!(a.div(Decimal::from_i64(-2)), Decimal::from_i64(3));
    }
}
