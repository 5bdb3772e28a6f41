//! # Order Error Types
//!
//! Error types for record-keeping operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                               │
//! │                                                                     │
//! │  ValidationError (obrador-core)                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  OrderError (this module) ← adds record-keeping failures            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Storefront displays user-friendly message                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use obrador_core::ValidationError;
use thiserror::Error;

/// Record-keeping errors.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A sale must contain at least one line.
    #[error("sale must contain at least one line")]
    EmptySale,

    /// No sale record with this id exists.
    #[error("sale not found: {0}")]
    SaleNotFound(String),

    /// Payment amount is invalid.
    #[error("invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// A line failed the core data-model invariants.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with OrderError.
pub type OrderResult<T> = Result<T, OrderError>;
