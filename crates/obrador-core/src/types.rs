//! # Domain Types
//!
//! Core domain types used throughout Obrador.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │  Ingredient   │   │     Tool      │   │    Recipe     │         │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │         │
//! │  │ price, unit   │   │ category      │   │ ingredients   │         │
//! │  │ amount        │   │ investment    │   │ tools         │         │
//! │  │ contains_*    │   │ amortization  │   │ batch_size    │         │
//! │  │ (packages)    │   │ memo fields   │   │ selling_price │         │
//! │  └───────────────┘   └───────────────┘   └───────────────┘         │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │  Measurement  │   │   ToolUsage   │   │   SaleLine    │         │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │         │
//! │  │ value + unit  │   │ Full          │   │ quantity      │         │
//! │  │ (value object)│   │ Partial { % } │   │ unit_price    │         │
//! │  └───────────────┘   │ Depreciated   │   └───────────────┘         │
//! │                      └───────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! All entities are caller-owned snapshots. The core never mutates a record
//! it is given — every operation returns new derived records or plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Measurement
// =============================================================================

/// A quantity paired with its unit: `1.5 kg`, `250 ml`, `2 docena`.
///
/// This is a value object, not an entity: immutable, produced and consumed
/// by pure functions. Conversion never modifies a measurement in place; it
/// returns a new one (or `None` when the units are incompatible).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement {
    /// Numeric magnitude in `unit`.
    pub value: f64,
    /// Unit name, always lower-case ("kg", "ml", "unidad", ...).
    pub unit: String,
}

impl Measurement {
    /// Creates a measurement, lower-casing the unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Measurement {
            value,
            unit: unit.into().to_lowercase(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A purchasable ingredient from the catalog.
///
/// ## Pricing Semantics
/// `price` is the cost of `amount` units of `unit`. When the ingredient is
/// sold as a package (`contains_amount`/`contains_unit` present), `price` is
/// the cost of one package that itself contains `contains_amount` of
/// `contains_unit` — e.g. a "paquete" of 500 g of butter.
///
/// ## Invariants
/// - `amount > 0` whenever it is used as a divisor
/// - `price >= 0`
///
/// Both are enforced by [`crate::validation::validate_ingredient`] at the
/// edge; the costing functions themselves degrade to `0.0` on degenerate
/// divisors rather than producing `NaN`/`Infinity`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    /// Unique identifier.
    pub id: String,

    /// Display name; also the density-table key (lower-cased) for
    /// weight↔volume conversion.
    pub name: String,

    /// Cost of `amount` units of `unit` (or of one package).
    pub price: f64,

    /// Native purchase unit ("kg", "paquete", ...).
    pub unit: String,

    /// How many `unit`s `price` buys.
    pub amount: f64,

    /// Package contents: quantity of `contains_unit` inside one `unit`.
    pub contains_amount: Option<f64>,

    /// Package contents: unit of the contained quantity.
    pub contains_unit: Option<String>,
}

impl Ingredient {
    /// Whether this ingredient carries explicit package metadata.
    #[inline]
    pub fn has_package_info(&self) -> bool {
        self.contains_amount.is_some() && self.contains_unit.is_some()
    }
}

// =============================================================================
// Tool
// =============================================================================

/// A durable tool (oven, mixer, pan) whose investment is amortized
/// across its expected lifetime batches.
///
/// ## Amortization Memo
/// The four `Option` fields are *derived*: computed once from `category` via
/// the fixed configuration table in [`crate::costing`] and cached onto the
/// record by [`crate::costing::setup_tool_costs`]. They are recomputed only
/// when absent; a record that already carries them is used as-is.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tool {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category key into the amortization config table ("horno",
    /// "batidora", ...). Unknown categories fall back to "general".
    pub category: String,

    /// Purchase cost of the tool.
    pub total_investment: f64,

    /// Memo: amortized cost charged per batch.
    pub cost_per_batch: Option<f64>,

    /// Memo: expected lifetime batches (batches_per_year × years).
    pub total_batches: Option<f64>,

    /// Memo: assumed resale/recovery value at end of life.
    pub recovery_value: Option<f64>,

    /// Memo: batches per year from the category config.
    pub batches_per_year: Option<f64>,
}

// =============================================================================
// Tool Usage
// =============================================================================

/// How much of a tool's per-batch amortized cost a recipe is charged.
///
/// Closed sum type, matched exhaustively — never a string with a default
/// fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ToolUsage {
    /// The recipe uses the tool fully: 100% of the per-batch cost.
    Full,
    /// Shared use: `percentage` of the per-batch cost (50% when unspecified).
    Partial { percentage: Option<f64> },
    /// The tool is already written off: 0%.
    Depreciated,
}

// =============================================================================
// Recipe
// =============================================================================

/// A reference from a recipe to an ingredient.
///
/// `amount` is expressed in the referenced ingredient's native unit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    pub amount: f64,
}

/// A reference from a recipe to a tool, tagged with its usage share.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeTool {
    pub tool_id: String,
    pub usage: ToolUsage,
}

/// A recipe: ingredient/tool references plus batch economics.
///
/// ## Invariants
/// `batch_size` should be `> 0` for per-unit division; dividing by a
/// non-positive batch size is defined to yield `0.0`, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub tools: Vec<RecipeTool>,
    /// Finished units produced by one batch.
    pub batch_size: f64,
    /// Selling price of one finished unit.
    pub selling_price: f64,
}

// =============================================================================
// Sale Line
// =============================================================================

/// One line of a sale as the cart/order layer hands it to the core:
/// a quantity at a unit price. This is the entire input the sale-total
/// arithmetic needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    pub quantity: f64,
    pub unit_price: f64,
}

// =============================================================================
// Collection Lookups
// =============================================================================

/// Finds an ingredient by id in a caller-supplied snapshot.
///
/// Returning `None` is not an error: an unresolved reference models
/// "temporarily out of catalog" and contributes zero cost downstream.
pub fn find_ingredient<'a>(ingredients: &'a [Ingredient], id: &str) -> Option<&'a Ingredient> {
    ingredients.iter().find(|i| i.id == id)
}

/// Finds a tool by id in a caller-supplied snapshot.
pub fn find_tool<'a>(tools: &'a [Tool], id: &str) -> Option<&'a Tool> {
    tools.iter().find(|t| t.id == id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_lowercases_unit() {
        let m = Measurement::new(1.5, "KG");
        assert_eq!(m.unit, "kg");
        assert_eq!(format!("{m}"), "1.5 kg");
    }

    #[test]
    fn test_package_info_requires_both_fields() {
        let mut ing = Ingredient {
            id: "i1".into(),
            name: "mantequilla".into(),
            price: 90.0,
            unit: "paquete".into(),
            amount: 1.0,
            contains_amount: Some(500.0),
            contains_unit: None,
        };
        assert!(!ing.has_package_info());

        ing.contains_unit = Some("g".into());
        assert!(ing.has_package_info());
    }

    #[test]
    fn test_tool_usage_serde_tagging() {
        let usage = ToolUsage::Partial {
            percentage: Some(30.0),
        };
        let json = serde_json::to_string(&usage).unwrap();
        assert_eq!(json, r#"{"mode":"partial","percentage":30.0}"#);

        let back: ToolUsage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, usage);
    }

    #[test]
    fn test_find_ingredient_by_id() {
        let ingredients = vec![Ingredient {
            id: "harina-1".into(),
            name: "harina".into(),
            price: 25.0,
            unit: "kg".into(),
            amount: 1.0,
            contains_amount: None,
            contains_unit: None,
        }];

        assert!(find_ingredient(&ingredients, "harina-1").is_some());
        assert!(find_ingredient(&ingredients, "azucar-1").is_none());
    }
}
