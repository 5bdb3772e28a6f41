//! # obrador-core: Pure Business Logic for Obrador
//!
//! This crate is the **heart** of Obrador, a storefront and back-of-house
//! tool for a small bakery. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Obrador Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                 Storefront / Recipe Editor UI                 │ │
//! │  │    Catalog ──► Cart ──► Checkout        Recipe ──► Live cost  │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                    │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │              ★ obrador-core (THIS CRATE) ★                    │ │
//! │  │                                                               │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │ │
//! │  │  │  units  │ │ density │ │ costing │ │ scaling │ │  money  │ │ │
//! │  │  │ convert │ │ g/ml by │ │ margins │ │ batches │ │ totals  │ │ │
//! │  │  │ tables  │ │ name    │ │ amortize│ │ stock   │ │ tax     │ │ │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘ │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                    │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │            obrador-orders (record keeping layer)              │ │
//! │  │      append-only sale/payment records, keyed by id            │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ingredient, Tool, Recipe, Measurement, ...)
//! - [`units`] - Unit categories, conversion table, standard-unit costing
//! - [`density`] - Substance densities for weight↔volume conversion
//! - [`costing`] - Recipe costing, tool amortization, margins
//! - [`scaling`] - Batch scaling and inventory feasibility
//! - [`money`] - Sale/tax arithmetic and display formatting
//! - [`validation`] - Data-model invariant checks
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same snapshot in, same numbers out
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **No exceptions for control flow**: incompatible conversions are
//!    `None`, unresolved references cost `0.0`, degenerate divisions
//!    yield `0.0` - never a panic, never NaN/Infinity
//! 4. **Full precision**: amounts stay `f64` end to end; rounding happens
//!    only at the display boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use obrador_core::types::Measurement;
//! use obrador_core::units::convert;
//! use obrador_core::money::sale_totals;
//! use obrador_core::types::SaleLine;
//! use obrador_core::DEFAULT_TAX_RATE;
//!
//! // Normalize a recipe amount
//! let flour = Measurement::new(2.0, "cup");
//! let ml = convert(&flour, "ml").unwrap();
//! assert!((ml.value - 473.176).abs() < 1e-6);
//!
//! // Build the figures a sale record persists
//! let totals = sale_totals(&[SaleLine { quantity: 2.0, unit_price: 50.0 }], DEFAULT_TAX_RATE);
//! assert_eq!(totals.total, 116.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod costing;
pub mod density;
pub mod error;
pub mod money;
pub mod scaling;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use obrador_core::Measurement` instead of
// `use obrador_core::types::Measurement`

pub use error::ValidationError;
pub use money::SaleTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate (16%) applied when the caller does not inject one.
///
/// ## Why a constant?
/// Tax law correctness beyond an injectable rate is out of scope; every
/// tax function takes the rate as a parameter and this is merely the
/// conventional value callers pass.
pub const DEFAULT_TAX_RATE: f64 = 0.16;

/// Default currency code used by the display formatter when the caller
/// does not inject one.
pub const DEFAULT_CURRENCY: &str = "MXN";

// =============================================================================
// Test Support
// =============================================================================
