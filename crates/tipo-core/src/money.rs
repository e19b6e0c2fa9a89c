//! # Money Module
//!
//! Provides the `Money` type for amounts shown to and charged from customers.
//!
//! ## Rates vs Amounts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TWO KINDS OF NUMBERS                                                   │
//! │                                                                         │
//! │  Rates (Decimal, exact):                                                │
//! │    45 lei/m², 0.165 lei/piece, 3.00 m², factor 1.10                    │
//! │    Never rounded while a price is being composed                       │
//! │                                                                         │
//! │  Amounts (Money, integer bani):                                         │
//! │    finalPrice, baseAmount, surcharge lines, fees                       │
//! │    Rounded ONCE, half away from zero, at the cent                      │
//! │                                                                         │
//! │  1 leu = 100 bani. Money stores bani.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use tipo_core::money::Money;
//!
//! // Create from bani (preferred)
//! let price = Money::from_cents(13500); // 135.00 lei
//!
//! // Round a composed decimal amount
//! let total = Money::from_decimal(dec!(123.455));
//! assert_eq!(total.cents(), 12346);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit (bani for RON).
///
/// ## Design Decisions
/// - **i64 (signed)**: break credits are negative amounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as an integer** of bani
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from bani (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tipo_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99 lei
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from lei and bani.
    ///
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50 lei, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Rounds a decimal amount in lei to the nearest ban.
    ///
    /// ## Rounding Rule
    /// Half away from zero at the cent: `0.005 → 0.01`, `-0.005 → -0.01`.
    /// This is the only place a composed price is rounded.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tipo_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(dec!(10.005)).cents(), 1001);
    /// assert_eq!(Money::from_decimal(dec!(10.004)).cents(), 1000);
    /// ```
    ///
    /// Amounts that do not fit in i64 bani become zero, the unpriceable
    /// sentinel. Use [`Money::try_from_decimal`] to tell them apart.
    pub fn from_decimal(amount: Decimal) -> Self {
        Self::try_from_decimal(amount).unwrap_or(Money(0))
    }

    /// Like [`Money::from_decimal`], but `None` when the amount overflows.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tipo_core::money::Money;
    ///
    /// assert!(Money::try_from_decimal(Decimal::MAX).is_none());
    /// ```
    pub fn try_from_decimal(amount: Decimal) -> Option<Self> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.checked_mul(Decimal::ONE_HUNDRED)?.to_i64().map(Money)
    }

    /// Returns the amount in lei as an exact decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in bani.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (lei) portion.
    #[inline]
    pub const fn lei(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (bani) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Splits a line total into the unit price stored on a cart line.
    ///
    /// ## Example
    /// ```rust
    /// use tipo_core::money::Money;
    ///
    /// let total = Money::from_cents(10000); // 100.00 lei for 3 pieces
    /// assert_eq!(total.per_unit(3).cents(), 3333);
    /// ```
    ///
    /// The remainder is not redistributed: `per_unit(q) * q` may differ from
    /// the total by less than `q` bani.
    pub fn per_unit(&self, quantity: u32) -> Money {
        if quantity == 0 {
            return *self;
        }
        Money::from_decimal(self.to_decimal() / Decimal::from(quantity))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `"135.00 lei"`.
///
/// ## Note
/// Storefront display formatting with a configurable symbol lives in
/// `tipo-store::config::StoreConfig::format_price`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02} lei", sign, self.lei().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.lei(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(13500)), "135.00 lei");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05 lei");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50 lei");
        assert_eq!(format!("{}", Money::zero()), "0.00 lei");
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(0.005)).cents(), 1);
        assert_eq!(Money::from_decimal(dec!(0.015)).cents(), 2);
        assert_eq!(Money::from_decimal(dec!(0.025)).cents(), 3);
        assert_eq!(Money::from_decimal(dec!(-0.005)).cents(), -1);
        assert_eq!(Money::from_decimal(dec!(135)).cents(), 13500);
        assert_eq!(Money::from_decimal(dec!(99.994999)).cents(), 9999);
    }

    #[test]
    fn test_from_decimal_overflow_is_unpriced() {
        let huge = dec!(1000000000000000000000000000);
        assert_eq!(Money::try_from_decimal(huge), None);
        assert_eq!(Money::from_decimal(huge), Money::zero());
        // fits a Decimal but not i64 bani
        assert_eq!(Money::try_from_decimal(dec!(100000000000000000)), None);
        assert_eq!(Money::try_from_decimal(dec!(12.345)), Some(Money::from_cents(1235)));
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(13550).to_decimal(), dec!(135.50));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);
        assert_eq!(vec![a, b, b].into_iter().sum::<Money>().cents(), 2000);
    }

    #[test]
    fn test_per_unit() {
        assert_eq!(Money::from_cents(180000).per_unit(20).cents(), 9000);
        // 100.00 / 3 = 33.333.. → 33.33
        assert_eq!(Money::from_cents(10000).per_unit(3).cents(), 3333);
        // 0.05 / 2 = 0.025 → 0.03
        assert_eq!(Money::from_cents(5).per_unit(2).cents(), 3);
        assert_eq!(Money::from_cents(700).per_unit(0).cents(), 700);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
