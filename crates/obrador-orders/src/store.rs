//! # Order Store
//!
//! Append-only sale/payment records, keyed by id.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sale Lifecycle                               │
//! │                                                                     │
//! │  1. RECORD                                                          │
//! │     └── record_sale(lines, rate) → SaleRecord { folio, totals }     │
//! │         totals computed once via obrador-core, persisted verbatim   │
//! │                                                                     │
//! │  2. PAY                                                             │
//! │     └── record_payment(sale_id, ...) → PaymentRecord                │
//! │     └── record_payment(...)            (split tender allowed)       │
//! │                                                                     │
//! │  3. READ                                                            │
//! │     └── get_sale(id) / list_sales() / payments_for(sale_id)         │
//! │                                                                     │
//! │  There is no update and no delete. Records are final once written.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is plain in-memory state; callers own it and provide any
//! coordination they need (concurrency control over records is out of
//! scope at this layer).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use obrador_core::money::sale_totals;
use obrador_core::validation::validate_sale_line;
use obrador_core::SaleLine;

use crate::error::{OrderError, OrderResult};

// =============================================================================
// Record Types
// =============================================================================

/// Input for one line of a sale: the product snapshot the cart hands over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleLine {
    pub product_id: String,
    /// Product name at time of sale (frozen onto the record).
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// One persisted line of a sale. Snapshot pattern: the product data is
/// frozen at time of sale and never re-read from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineRecord {
    pub product_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// quantity × unit_price, computed by the core at record time.
    pub line_total: f64,
}

/// A persisted sale. The aggregate figures are exactly what the core's
/// helpers returned; this layer never recomputes tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Sequential human-readable receipt number ("F-000001").
    pub folio: String,
    pub lines: Vec<SaleLineRecord>,
    pub subtotal: f64,
    /// Tax rate the sale was recorded under.
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

/// A payment towards a sale. A sale can have multiple payments for
/// split tender scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub sale_id: String,
    pub method: PaymentMethod,
    pub amount: f64,
    /// External reference (terminal auth code, transfer folio, ...).
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order Store
// =============================================================================

/// Append-only store for sale and payment records.
#[derive(Debug, Default)]
pub struct OrderStore {
    sales: HashMap<String, SaleRecord>,
    /// Insertion order, so listings read like a receipt roll.
    sale_order: Vec<String>,
    payments: Vec<PaymentRecord>,
    next_folio: u64,
}

impl OrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        OrderStore::default()
    }

    /// Records a sale from cart lines.
    ///
    /// Validates every line against the core invariants, computes
    /// subtotal/tax/total through the core's aggregate helpers, and
    /// persists the figures verbatim under a fresh id and folio.
    pub fn record_sale(
        &mut self,
        lines: &[NewSaleLine],
        tax_rate: f64,
        currency: &str,
    ) -> OrderResult<SaleRecord> {
        if lines.is_empty() {
            return Err(OrderError::EmptySale);
        }

        let core_lines: Vec<SaleLine> = lines
            .iter()
            .map(|l| SaleLine {
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();
        for line in &core_lines {
            validate_sale_line(line)?;
        }

        let totals = sale_totals(&core_lines, tax_rate);

        self.next_folio += 1;
        let record = SaleRecord {
            id: Uuid::new_v4().to_string(),
            folio: format!("F-{:06}", self.next_folio),
            lines: lines
                .iter()
                .map(|l| SaleLineRecord {
                    product_id: l.product_id.clone(),
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    line_total: obrador_core::money::line_total(l.quantity, l.unit_price),
                })
                .collect(),
            subtotal: totals.subtotal,
            tax_rate,
            tax_amount: totals.tax,
            total: totals.total,
            currency: currency.to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %record.id, folio = %record.folio, total = record.total, "recording sale");

        self.sale_order.push(record.id.clone());
        self.sales.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Records a payment towards an existing sale.
    pub fn record_payment(
        &mut self,
        sale_id: &str,
        method: PaymentMethod,
        amount: f64,
        reference: Option<String>,
    ) -> OrderResult<PaymentRecord> {
        if !self.sales.contains_key(sale_id) {
            return Err(OrderError::SaleNotFound(sale_id.to_string()));
        }
        if amount <= 0.0 {
            return Err(OrderError::InvalidPaymentAmount {
                reason: "must be positive".to_string(),
            });
        }

        let record = PaymentRecord {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.to_string(),
            method,
            amount,
            reference,
            created_at: Utc::now(),
        };

        debug!(id = %record.id, sale_id = %record.sale_id, amount = record.amount, "recording payment");

        self.payments.push(record.clone());
        Ok(record)
    }

    /// Gets a sale record by id.
    pub fn get_sale(&self, id: &str) -> Option<&SaleRecord> {
        self.sales.get(id)
    }

    /// All sale records in the order they were recorded.
    pub fn list_sales(&self) -> Vec<&SaleRecord> {
        self.sale_order
            .iter()
            .filter_map(|id| self.sales.get(id))
            .collect()
    }

    /// All payments recorded against one sale.
    pub fn payments_for(&self, sale_id: &str) -> Vec<&PaymentRecord> {
        self.payments
            .iter()
            .filter(|p| p.sale_id == sale_id)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use obrador_core::{DEFAULT_CURRENCY, DEFAULT_TAX_RATE};

    fn concha_line() -> NewSaleLine {
        NewSaleLine {
            product_id: "p1".into(),
            name: "Concha".into(),
            quantity: 2.0,
            unit_price: 50.0,
        }
    }

    #[test]
    fn test_record_sale_persists_core_totals() {
        let mut store = OrderStore::new();
        let sale = store
            .record_sale(&[concha_line()], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap();

        assert!((sale.subtotal - 100.0).abs() < 1e-9);
        assert!((sale.tax_amount - 16.0).abs() < 1e-9);
        assert!((sale.total - 116.0).abs() < 1e-9);
        assert_eq!(sale.folio, "F-000001");
        assert_eq!(sale.currency, "MXN");
        assert_eq!(sale.lines.len(), 1);
        assert!((sale.lines[0].line_total - 100.0).abs() < 1e-9);

        let stored = store.get_sale(&sale.id).unwrap();
        assert_eq!(stored.folio, sale.folio);
    }

    #[test]
    fn test_folios_are_sequential() {
        let mut store = OrderStore::new();
        let first = store
            .record_sale(&[concha_line()], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap();
        let second = store
            .record_sale(&[concha_line()], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap();

        assert_eq!(first.folio, "F-000001");
        assert_eq!(second.folio, "F-000002");
        assert_ne!(first.id, second.id);

        let listed = store.list_sales();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[test]
    fn test_empty_sale_rejected() {
        let mut store = OrderStore::new();
        let err = store
            .record_sale(&[], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap_err();
        assert!(matches!(err, OrderError::EmptySale));
    }

    #[test]
    fn test_invalid_line_rejected() {
        let mut store = OrderStore::new();
        let mut line = concha_line();
        line.quantity = 0.0;
        let err = store
            .record_sale(&[line], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_payment_requires_existing_sale() {
        let mut store = OrderStore::new();
        let err = store
            .record_payment("no-such-sale", PaymentMethod::Cash, 50.0, None)
            .unwrap_err();
        assert!(matches!(err, OrderError::SaleNotFound(_)));
    }

    #[test]
    fn test_split_tender_payments() {
        let mut store = OrderStore::new();
        let sale = store
            .record_sale(&[concha_line()], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap();

        store
            .record_payment(&sale.id, PaymentMethod::Cash, 100.0, None)
            .unwrap();
        store
            .record_payment(
                &sale.id,
                PaymentMethod::Card,
                16.0,
                Some("AUTH-42".into()),
            )
            .unwrap();

        let payments = store.payments_for(&sale.id);
        assert_eq!(payments.len(), 2);
        let paid: f64 = payments.iter().map(|p| p.amount).sum();
        assert!((paid - sale.total).abs() < 1e-9);
    }

    #[test]
    fn test_nonpositive_payment_rejected() {
        let mut store = OrderStore::new();
        let sale = store
            .record_sale(&[concha_line()], DEFAULT_TAX_RATE, DEFAULT_CURRENCY)
            .unwrap();
        let err = store
            .record_payment(&sale.id, PaymentMethod::Cash, 0.0, None)
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidPaymentAmount { .. }));
    }
}
