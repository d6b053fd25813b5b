//! # Pricing Module
//!
//! The arithmetic of a quotation, kept apart from validation and storage so
//! it can be checked by itself.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quotation Pricing                                  │
//! │                                                                         │
//! │  items ──► line_total(precioUnitario, cantidad)  = round2(p × q)       │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │            subTotal = round2(Σ totalItem)                              │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │            impuesto = round2(subTotal × 0.08)                          │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │            total    = round2(subTotal + impuesto)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The subtotal is rounded twice: once per item, then again after summing
//! the already-rounded item totals as decimals. Existing quotations were
//! priced that way and must reproduce to the cent.

use crate::money::Money;
use crate::types::TaxRate;

/// Rounds to 2 decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use cotiza_core::pricing::round2;
///
/// assert_eq!(round2(9.6), 9.6);
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(-0.125), -0.13);
/// ```
pub fn round2(value: f64) -> f64 {
    Money::from_decimal(value).to_decimal()
}

/// Prices one line item: `round2(unit_price × quantity)`.
pub fn line_total(unit_price: f64, quantity: i64) -> Money {
    Money::from_decimal(unit_price * quantity as f64)
}

// =============================================================================
// Quotation Totals
// =============================================================================

/// The three totals stored on every quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotationTotals {
    pub sub_total: Money,
    pub tax: Money,
    pub total: Money,
}

impl QuotationTotals {
    /// Computes subtotal, tax and total from already-priced line totals.
    ///
    /// ## Example
    /// ```rust
    /// use cotiza_core::pricing::{line_total, QuotationTotals};
    /// use cotiza_core::TAX_RATE;
    ///
    /// let totals = QuotationTotals::compute([line_total(19.99, 3)], TAX_RATE);
    /// assert_eq!(totals.sub_total.cents(), 5997);
    /// assert_eq!(totals.tax.cents(), 480);
    /// assert_eq!(totals.total.cents(), 6477);
    /// ```
    pub fn compute(item_totals: impl IntoIterator<Item = Money>, rate: TaxRate) -> Self {
        let sum: f64 = item_totals.into_iter().map(|m| m.to_decimal()).sum();
        let sub_total = Money::from_decimal(sum);
        let tax = sub_total.calculate_tax(rate);
        let total = Money::from_decimal(sub_total.to_decimal() + tax.to_decimal());

        QuotationTotals {
            sub_total,
            tax,
            total,
        }
    }

    /// Totals of a quotation with no items.
    pub const fn zero() -> Self {
        QuotationTotals {
            sub_total: Money::zero(),
            tax: Money::zero(),
            total: Money::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TAX_RATE;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(50.0, 2).cents(), 10000);
        assert_eq!(line_total(20.0, 1).cents(), 2000);
        assert_eq!(line_total(12.5, 3).cents(), 3750);
        assert_eq!(line_total(0.0, 7).cents(), 0);
    }

    #[test]
    fn test_reference_quotation() {
        let items = [line_total(50.0, 2), line_total(20.0, 1)];
        let totals = QuotationTotals::compute(items, TAX_RATE);

        assert_eq!(totals.sub_total, Money::from_cents(12000));
        assert_eq!(totals.tax, Money::from_cents(960));
        assert_eq!(totals.total, Money::from_cents(12960));
    }

    #[test]
    fn test_subtotal_sums_rounded_items() {
        // 0.333 × 1 → 0.33, three times → 0.99 (not round2(0.999) = 1.00)
        let items = [line_total(0.333, 1), line_total(0.333, 1), line_total(0.333, 1)];
        let totals = QuotationTotals::compute(items, TAX_RATE);

        assert_eq!(totals.sub_total.cents(), 99);
        // 0.99 × 0.08 = 0.0792 → 0.08
        assert_eq!(totals.tax.cents(), 8);
        assert_eq!(totals.total.cents(), 107);
    }

    #[test]
    fn test_total_is_subtotal_plus_tax() {
        let items = [line_total(33.33, 3), line_total(7.77, 9)];
        let totals = QuotationTotals::compute(items, TAX_RATE);

        assert_eq!(totals.total, totals.sub_total + totals.tax);
        assert_eq!(totals.tax, totals.sub_total.calculate_tax(TAX_RATE));
    }

    #[test]
    fn test_empty_items_are_zero() {
        let totals = QuotationTotals::compute(std::iter::empty(), TAX_RATE);
        assert_eq!(totals, QuotationTotals::zero());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(120.0), 120.0);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(0.0792), 0.08);
    }
}
