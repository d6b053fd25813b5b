//! # Money Module
//!
//! Provides the `Money` type for handling monetary totals safely.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Quotation prices arrive as decimals (precioUnitario = 12.5), so the    │
//! │  multiplication itself is done in f64. But every value that leaves a   │
//! │  pricing step is rounded to 2 decimals and stored as whole cents:      │
//! │                                                                         │
//! │    12.5 × 3 = 37.5  ──round2──►  Money(3750)                            │
//! │                                                                         │
//! │  Totals are therefore exact once computed, in the database and on the  │
//! │  wire.                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cotiza_core::money::Money;
//!
//! let price = Money::from_cents(1099);           // $10.99
//! let total = price + Money::from_cents(500);    // $15.99
//! assert_eq!(total.cents(), 1599);
//!
//! // Decimals are rounded half away from zero at 2 places
//! assert_eq!(Money::from_decimal(0.125).cents(), 13);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Wire Format
/// Serialized as a decimal JSON number (`129.6`), because that is what the
/// front-end has always received for `subTotal`, `impuesto`, `total` and
/// `totalItem`. Stored in the database as integer cents.
///
/// ## Where Money is Used
/// ```text
/// precioUnitario × cantidad ──round2──► LineItem.item_total
///                                             │
///                          Σ item_total ──round2──► Quotation.sub_total
///                                                        │
///                               sub_total × 8% ──round2──► Quotation.tax
///                                                        │
///                              sub_total + tax ──round2──► Quotation.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use cotiza_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding half away from
    /// zero at two decimal places.
    ///
    /// This is the `round2` every pricing step goes through.
    ///
    /// ## Example
    /// ```rust
    /// use cotiza_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(129.6).cents(), 12960);
    /// assert_eq!(Money::from_decimal(37.5).cents(), 3750);
    /// assert_eq!(Money::from_decimal(-0.125).cents(), -13);
    /// ```
    ///
    /// ## Note
    /// The cast saturates: NaN becomes zero and anything beyond `i64` cents
    /// (infinities included) clamps to `i64::MIN`/`i64::MAX`. Pricing checks
    /// amounts against [`MAX_QUOTATION_AMOUNT`](crate::MAX_QUOTATION_AMOUNT)
    /// before they get here.
    #[inline]
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value as a decimal amount (`12960` cents → `129.6`).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount: `round2(amount × rate)`.
    ///
    /// ## Example
    /// ```rust
    /// use cotiza_core::money::Money;
    /// use cotiza_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(12000); // $120.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax.cents(), 960); // $9.60
    /// ```
    ///
    /// ## Rounding
    /// The product is taken in decimal units and rounded half away from
    /// zero, the same as every other pricing step. At 8% a cent amount can
    /// never land exactly on a half cent, so no tie ever reaches the rounding.
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money::from_decimal(self.to_decimal() * rate.fraction())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable format, for logs.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(0.125).cents(), 13);
        assert_eq!(Money::from_decimal(-0.125).cents(), -13);
        assert_eq!(Money::from_decimal(10.0).cents(), 1000);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    }

    #[test]
    fn test_from_decimal_non_finite_is_zero() {
        assert!(Money::from_decimal(f64::NAN).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(12960)), "$129.60");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_tax_calculation() {
        // $120.00 at 8% = $9.60
        let amount = Money::from_cents(12000);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(800)).cents(), 960);

        // $0.19 at 8% = $0.0152 → $0.02
        let amount = Money::from_cents(19);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(800)).cents(), 2);
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        let json = serde_json::to_string(&Money::from_cents(12960)).unwrap();
        assert_eq!(json, "129.6");

        let back: Money = serde_json::from_str("9.6").unwrap();
        assert_eq!(back.cents(), 960);
    }
}
