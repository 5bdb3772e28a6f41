//! # Sale & Tax Arithmetic
//!
//! The four pure functions the order/payment layer persists from — it
//! treats these numbers as final and never recomputes tax itself:
//!
//! ```text
//! line_total  = quantity × unit_price
//! subtotal    = Σ line_total
//! tax_amount  = subtotal × rate          (default rate 0.16)
//! total       = subtotal + tax_amount
//! ```
//!
//! All functions are order-independent over their inputs. Amounts stay at
//! full `f64` precision through every intermediate step; [`format_amount`]
//! is the only place a figure is rounded, at the display boundary.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::SaleLine;
use crate::DEFAULT_CURRENCY;

// =============================================================================
// Sale Totals
// =============================================================================

/// The aggregate figures of one sale, as handed to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Line total: quantity × unit price.
#[inline]
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Subtotal across all sale lines.
pub fn sale_subtotal_from_items(items: &[SaleLine]) -> f64 {
    items
        .iter()
        .map(|line| line_total(line.quantity, line.unit_price))
        .sum()
}

/// Tax amount on a subtotal at the given rate (0.16 = 16%).
#[inline]
pub fn sale_tax_from_subtotal(subtotal: f64, rate: f64) -> f64 {
    subtotal * rate
}

/// Grand total: subtotal plus tax at the given rate.
#[inline]
pub fn sale_total_from_subtotal(subtotal: f64, rate: f64) -> f64 {
    subtotal + sale_tax_from_subtotal(subtotal, rate)
}

/// Computes all three aggregate figures in one pass.
///
/// ## Example
/// ```rust
/// use obrador_core::money::sale_totals;
/// use obrador_core::types::SaleLine;
/// use obrador_core::DEFAULT_TAX_RATE;
///
/// let items = [SaleLine { quantity: 2.0, unit_price: 50.0 }];
/// let totals = sale_totals(&items, DEFAULT_TAX_RATE);
/// assert_eq!(totals.subtotal, 100.0);
/// assert_eq!(totals.tax, 16.0);
/// assert_eq!(totals.total, 116.0);
/// ```
pub fn sale_totals(items: &[SaleLine], rate: f64) -> SaleTotals {
    let subtotal = sale_subtotal_from_items(items);
    let tax = sale_tax_from_subtotal(subtotal, rate);
    SaleTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount for display: two decimals plus a currency code.
///
/// This is the ONLY rounding point in the workspace; everything upstream
/// carries full precision.
pub fn format_amount(value: f64, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

/// [`format_amount`] with the default currency.
pub fn format_amount_default(value: f64) -> String {
    format_amount(value, DEFAULT_CURRENCY)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_close;
    use crate::DEFAULT_TAX_RATE;

    #[test]
    fn test_sale_totals_fixture() {
        let items = [SaleLine {
            quantity: 2.0,
            unit_price: 50.0,
        }];
        let totals = sale_totals(&items, DEFAULT_TAX_RATE);
        assert_close(totals.subtotal, 100.0, 1e-9);
        assert_close(totals.tax, 16.0, 1e-9);
        assert_close(totals.total, 116.0, 1e-9);
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let a = SaleLine {
            quantity: 3.0,
            unit_price: 12.5,
        };
        let b = SaleLine {
            quantity: 1.0,
            unit_price: 7.25,
        };
        let c = SaleLine {
            quantity: 2.0,
            unit_price: 33.0,
        };
        let forward = sale_subtotal_from_items(&[a, b, c]);
        let backward = sale_subtotal_from_items(&[c, b, a]);
        assert_close(forward, backward, 1e-9);
    }

    #[test]
    fn test_empty_sale_is_zero() {
        let totals = sale_totals(&[], DEFAULT_TAX_RATE);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_rate_is_injectable() {
        assert_close(sale_tax_from_subtotal(200.0, 0.08), 16.0, 1e-9);
        assert_close(sale_total_from_subtotal(200.0, 0.0), 200.0, 1e-9);
    }

    #[test]
    fn test_format_rounds_only_at_display() {
        // 2.5333... stays exact internally and rounds at the edge.
        let per_unit = 30.4 / 12.0;
        assert_eq!(format_amount(per_unit, "MXN"), "2.53 MXN");
        assert_eq!(format_amount_default(116.0), "116.00 MXN");
        assert_eq!(format_amount(2.536, "USD"), "2.54 USD");
    }
}
