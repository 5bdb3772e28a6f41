//! # Cost Engine
//!
//! Ingredient unit cost, tool amortization, recipe batch/unit cost and
//! margins. This is the single canonical costing module — every caller
//! (storefront, recipe editor, order service) computes through here.
//!
//! ## Cost Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Recipe Costing                               │
//! │                                                                     │
//! │  Ingredient ──► ingredient_cost_per_unit ──┐                        │
//! │                      (× recipe amount)     │                        │
//! │                                            ├──► recipe_cost         │
//! │  Tool ──► tool_cost_per_batch ─────────────┘        │               │
//! │              (× usage % / 100)                      ▼               │
//! │                                              cost_per_unit          │
//! │                                                     │               │
//! │                                                     ▼               │
//! │                                      margin_amount / margin_percent │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Rules
//! - unresolved ingredient/tool reference → contributes `0.0`, silently
//!   (models "temporarily out of catalog")
//! - non-positive divisor (`batch_size`, `selling_price`, package
//!   `contains_amount`) → the derived quantity is `0.0`, never NaN/Infinity
//!
//! Full precision is kept through every intermediate step; rounding
//! happens only at the display boundary ([`crate::money::format_amount`]).

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::{find_ingredient, find_tool, Ingredient, Recipe, RecipeTool, Tool, ToolUsage};
use crate::units::convert_to_standard_unit;

// =============================================================================
// Tool Amortization Configuration
// =============================================================================

/// Per-category amortization parameters.
#[derive(Debug, Clone, Copy)]
pub struct ToolCategoryConfig {
    /// How many batches the tool runs in a year.
    pub batches_per_year: f64,
    /// Expected useful life in years.
    pub years_lifespan: f64,
    /// Fraction of the investment recoverable at end of life (resale).
    pub recovery_rate: f64,
}

/// Fixed amortization table. Unknown categories use "general".
///
/// Process-wide immutable data, never exposed for runtime mutation.
static TOOL_CATEGORY_CONFIGS: LazyLock<HashMap<&'static str, ToolCategoryConfig>> =
    LazyLock::new(|| {
        let mut t = HashMap::new();
        t.insert(
            "horno",
            ToolCategoryConfig {
                batches_per_year: 300.0,
                years_lifespan: 5.0,
                recovery_rate: 0.15,
            },
        );
        t.insert(
            "batidora",
            ToolCategoryConfig {
                batches_per_year: 50.0,
                years_lifespan: 2.0,
                recovery_rate: 0.1,
            },
        );
        t.insert(
            "molde",
            ToolCategoryConfig {
                batches_per_year: 200.0,
                years_lifespan: 3.0,
                recovery_rate: 0.05,
            },
        );
        t.insert(
            "refrigerador",
            ToolCategoryConfig {
                batches_per_year: 350.0,
                years_lifespan: 6.0,
                recovery_rate: 0.2,
            },
        );
        t.insert(
            "general",
            ToolCategoryConfig {
                batches_per_year: 100.0,
                years_lifespan: 2.0,
                recovery_rate: 0.1,
            },
        );
        t
    });

/// Looks up a category's amortization config, falling back to "general".
pub fn tool_category_config(category: &str) -> ToolCategoryConfig {
    let key = category.to_lowercase();
    TOOL_CATEGORY_CONFIGS
        .get(key.as_str())
        .copied()
        .unwrap_or_else(|| TOOL_CATEGORY_CONFIGS["general"])
}

// =============================================================================
// Ingredient Costing
// =============================================================================

/// Cost of one *standard unit* of this ingredient (per g, per ml, per
/// unidad, or per stated unit when it passes through standardization).
///
/// ## Package Pricing
/// With `contains_amount`/`contains_unit` present, the package price is
/// first divided down to cost-per-contained-unit, then rescaled by the
/// standardized size of one contained unit.
///
/// ## Example
/// ```rust
/// use obrador_core::costing::ingredient_cost_per_unit;
/// use obrador_core::types::Ingredient;
///
/// // $200 buys 1 kg; kg passes through standardization unchanged.
/// let sugar = Ingredient {
///     id: "azucar".into(),
///     name: "azúcar".into(),
///     price: 200.0,
///     unit: "kg".into(),
///     amount: 1.0,
///     contains_amount: None,
///     contains_unit: None,
/// };
/// assert_eq!(ingredient_cost_per_unit(&sugar), 200.0);
/// ```
pub fn ingredient_cost_per_unit(ingredient: &Ingredient) -> f64 {
    if let (Some(contains_amount), Some(contains_unit)) = (
        ingredient.contains_amount,
        ingredient.contains_unit.as_deref(),
    ) {
        if contains_amount <= 0.0 {
            return 0.0;
        }
        let cost_per_contained = ingredient.price / contains_amount;
        let standard = convert_to_standard_unit(1.0, contains_unit, None, None);
        if standard.value <= 0.0 {
            return 0.0;
        }
        return cost_per_contained / standard.value;
    }

    let standard = convert_to_standard_unit(ingredient.amount, &ingredient.unit, None, None);
    if standard.value <= 0.0 {
        return 0.0;
    }
    ingredient.price / standard.value
}

// =============================================================================
// Tool Costing
// =============================================================================

/// Amortized cost of one batch on this tool.
///
/// Uses the memoized `cost_per_batch` when present; otherwise computes
/// `(investment − recovery) / total_batches` from the category config
/// (`0.0` when the lifetime batch count is non-positive).
pub fn tool_cost_per_batch(tool: &Tool) -> f64 {
    if let Some(cost) = tool.cost_per_batch {
        return cost;
    }
    let config = tool_category_config(&tool.category);
    let total_batches = config.batches_per_year * config.years_lifespan;
    if total_batches <= 0.0 {
        return 0.0;
    }
    let recovery = tool.total_investment * config.recovery_rate;
    (tool.total_investment - recovery) / total_batches
}

/// Returns a copy of the tool with the amortization memo filled in.
///
/// Recomputed only when absent — a tool that already carries
/// `cost_per_batch` is returned unchanged. The input record is never
/// mutated.
pub fn setup_tool_costs(tool: &Tool) -> Tool {
    if tool.cost_per_batch.is_some() {
        return tool.clone();
    }

    let config = tool_category_config(&tool.category);
    let total_batches = config.batches_per_year * config.years_lifespan;
    let recovery = tool.total_investment * config.recovery_rate;
    let cost_per_batch = if total_batches <= 0.0 {
        0.0
    } else {
        (tool.total_investment - recovery) / total_batches
    };

    Tool {
        cost_per_batch: Some(cost_per_batch),
        total_batches: Some(total_batches),
        recovery_value: Some(recovery),
        batches_per_year: Some(config.batches_per_year),
        ..tool.clone()
    }
}

/// The share (0–100) of a tool's per-batch cost charged to a recipe.
///
/// A missing recipe-tool reference means full use is assumed.
pub fn usage_percentage(recipe_tool: Option<&RecipeTool>) -> f64 {
    match recipe_tool {
        None => 100.0,
        Some(rt) => match rt.usage {
            ToolUsage::Full => 100.0,
            ToolUsage::Partial { percentage } => percentage.unwrap_or(50.0),
            ToolUsage::Depreciated => 0.0,
        },
    }
}

/// Tool cost charged to one batch of a specific recipe.
pub fn tool_cost_for_recipe(tool: &Tool, recipe_tool: &RecipeTool) -> f64 {
    tool_cost_per_batch(tool) * usage_percentage(Some(recipe_tool)) / 100.0
}

// =============================================================================
// Recipe Costing
// =============================================================================

/// Total cost of producing one batch of the recipe.
///
/// Sums ingredient costs (unit cost × recipe amount) and tool shares,
/// over the references that resolve in the supplied snapshots. Unresolved
/// ids contribute `0.0` silently.
pub fn recipe_cost(recipe: &Recipe, ingredients: &[Ingredient], tools: &[Tool]) -> f64 {
    let ingredient_total: f64 = recipe
        .ingredients
        .iter()
        .map(|ri| {
            find_ingredient(ingredients, &ri.ingredient_id)
                .map(|ing| ingredient_cost_per_unit(ing) * ri.amount)
                .unwrap_or(0.0)
        })
        .sum();

    let tool_total: f64 = recipe
        .tools
        .iter()
        .map(|rt| {
            find_tool(tools, &rt.tool_id)
                .map(|tool| tool_cost_for_recipe(tool, rt))
                .unwrap_or(0.0)
        })
        .sum();

    ingredient_total + tool_total
}

/// Cost of one finished unit (`0.0` when `batch_size <= 0`).
pub fn cost_per_unit(recipe: &Recipe, ingredients: &[Ingredient], tools: &[Tool]) -> f64 {
    if recipe.batch_size <= 0.0 {
        return 0.0;
    }
    recipe_cost(recipe, ingredients, tools) / recipe.batch_size
}

/// Absolute profit per finished unit.
pub fn margin_amount(recipe: &Recipe, ingredients: &[Ingredient], tools: &[Tool]) -> f64 {
    recipe.selling_price - cost_per_unit(recipe, ingredients, tools)
}

/// Profit as a percentage of the selling price (`0.0` when
/// `selling_price <= 0`).
pub fn margin_percent(recipe: &Recipe, ingredients: &[Ingredient], tools: &[Tool]) -> f64 {
    if recipe.selling_price <= 0.0 {
        return 0.0;
    }
    margin_amount(recipe, ingredients, tools) / recipe.selling_price * 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
