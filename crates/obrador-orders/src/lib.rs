//! # obrador-orders: Order/Payment Record Keeping
//!
//! Append-only sale and payment records for Obrador, built on top of
//! [`obrador_core`]'s aggregate-total helpers.
//!
//! ## Contract with the Core
//! This layer calls `sale_totals` (subtotal, tax, total) exactly once per
//! sale and treats the returned numbers as final - it never recomputes
//! tax itself. Records are keyed by id and final once written: there is
//! no update and no delete surface.
//!
//! ## Modules
//!
//! - [`store`] - The append-only [`store::OrderStore`] and its record types
//! - [`error`] - [`error::OrderError`]

pub mod error;
pub mod store;

pub use error::{OrderError, OrderResult};
pub use store::{NewSaleLine, OrderStore, PaymentMethod, PaymentRecord, SaleLineRecord, SaleRecord};
