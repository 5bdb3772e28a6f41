//! # Recipe Scaling & Inventory Feasibility
//!
//! Batch scaling, per-ingredient unit retargeting, and the
//! "how many can I make with what's on the shelf" computation.
//!
//! Shares the Recipe/Ingredient data model with the cost engine but does
//! not call it — scaling is pure quantity arithmetic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{find_ingredient, Ingredient, Measurement, Recipe, RecipeIngredient};
use crate::units::convert;

// =============================================================================
// Batch Scaling
// =============================================================================

/// Rescales a recipe to a new batch size.
///
/// `factor = new_batch_size / batch_size`; every resolvable ingredient
/// amount and the selling price are multiplied by it, and `batch_size` is
/// replaced. Ingredient references that do not resolve in the supplied
/// snapshot pass through unscaled. A non-positive current batch size makes
/// the factor undefined, so only `batch_size` is replaced.
///
/// The input recipe is never mutated; a new record is returned.
pub fn scale_recipe(recipe: &Recipe, ingredients: &[Ingredient], new_batch_size: f64) -> Recipe {
    if recipe.batch_size <= 0.0 {
        let mut scaled = recipe.clone();
        scaled.batch_size = new_batch_size;
        return scaled;
    }

    let factor = new_batch_size / recipe.batch_size;

    let scaled_ingredients = recipe
        .ingredients
        .iter()
        .map(|ri| {
            let amount = if find_ingredient(ingredients, &ri.ingredient_id).is_some() {
                ri.amount * factor
            } else {
                ri.amount
            };
            RecipeIngredient {
                ingredient_id: ri.ingredient_id.clone(),
                amount,
            }
        })
        .collect();

    Recipe {
        ingredients: scaled_ingredients,
        batch_size: new_batch_size,
        selling_price: recipe.selling_price * factor,
        ..recipe.clone()
    }
}

// =============================================================================
// Unit Retargeting
// =============================================================================

/// Re-expresses recipe amounts in per-ingredient target units.
///
/// For each recipe ingredient whose underlying catalog unit differs from
/// the requested target, the amount is converted. When no target is
/// requested, the reference does not resolve, or the conversion is
/// incompatible, the amount (and its implicit unit) stays unchanged.
pub fn convert_recipe_units(
    recipe: &Recipe,
    ingredients: &[Ingredient],
    target_units: &HashMap<String, String>,
) -> Recipe {
    let converted = recipe
        .ingredients
        .iter()
        .map(|ri| {
            let mut amount = ri.amount;
            if let (Some(target), Some(ingredient)) = (
                target_units.get(&ri.ingredient_id),
                find_ingredient(ingredients, &ri.ingredient_id),
            ) {
                if ingredient.unit != *target {
                    if let Some(m) = convert(&Measurement::new(ri.amount, &ingredient.unit), target)
                    {
                        amount = m.value;
                    }
                }
            }
            RecipeIngredient {
                ingredient_id: ri.ingredient_id.clone(),
                amount,
            }
        })
        .collect();

    Recipe {
        ingredients: converted,
        ..recipe.clone()
    }
}

/// Sums every ingredient amount expressed in `target_unit`, skipping
/// (not erroring on) ingredients whose unit is incompatible with the
/// target or whose reference does not resolve.
pub fn calculate_recipe_totals(
    recipe: &Recipe,
    ingredients: &[Ingredient],
    target_unit: &str,
) -> f64 {
    recipe
        .ingredients
        .iter()
        .filter_map(|ri| {
            let ingredient = find_ingredient(ingredients, &ri.ingredient_id)?;
            let converted = convert(&Measurement::new(ri.amount, &ingredient.unit), target_unit)?;
            Some(converted.value)
        })
        .sum()
}

// =============================================================================
// Inventory Feasibility
// =============================================================================

/// An ingredient whose stock does not cover the current batch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MissingIngredient {
    pub ingredient_id: String,
    /// Catalog name when the reference resolves, the id otherwise.
    pub name: String,
    /// Amount one batch requires (ingredient's native unit).
    pub required: f64,
    /// Amount currently in stock.
    pub available: f64,
}

/// Result of an inventory feasibility check.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryReport {
    /// True when every ingredient covers the current batch.
    pub can_make: bool,
    /// Every ingredient with `available < required`, independent of the
    /// global bottleneck.
    pub missing: Vec<MissingIngredient>,
    /// Largest integer number of finished units makeable at current
    /// stock: `floor(min(available/required) × batch_size)`.
    pub scale_factor: i64,
}

/// Computes the bottleneck-constrained production capacity.
///
/// The **bottleneck ingredient** is the one with the minimum
/// `available / required` ratio across the whole recipe; ratios are taken
/// against the *current*, unscaled batch amounts, and the floor is applied
/// once at the very end. An ingredient absent from the inventory map
/// counts as `available = 0`.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use obrador_core::scaling::check_inventory;
/// use obrador_core::types::{Recipe, RecipeIngredient};
///
/// // One batch of 12 units needs 1 kg of flour; 2.5 kg on hand.
/// let recipe = Recipe {
///     id: "r1".into(),
///     name: "Bolillo".into(),
///     ingredients: vec![RecipeIngredient { ingredient_id: "harina".into(), amount: 1.0 }],
///     tools: vec![],
///     batch_size: 12.0,
///     selling_price: 8.0,
/// };
/// let inventory = HashMap::from([("harina".to_string(), 2.5)]);
///
/// let report = check_inventory(&recipe, &[], &inventory);
/// assert!(report.can_make);
/// assert!(report.missing.is_empty());
/// assert_eq!(report.scale_factor, 30); // floor(2.5 × 12)
/// ```
pub fn check_inventory(
    recipe: &Recipe,
    ingredients: &[Ingredient],
    inventory: &HashMap<String, f64>,
) -> InventoryReport {
    let mut min_ratio: Option<f64> = None;
    let mut missing = Vec::new();

    for ri in &recipe.ingredients {
        if ri.amount <= 0.0 {
            // Requires nothing, so it cannot constrain production.
            continue;
        }
        let available = inventory.get(&ri.ingredient_id).copied().unwrap_or(0.0);
        let ratio = available / ri.amount;
        min_ratio = Some(min_ratio.map_or(ratio, |m| m.min(ratio)));

        if available < ri.amount {
            let name = find_ingredient(ingredients, &ri.ingredient_id)
                .map(|i| i.name.clone())
                .unwrap_or_else(|| ri.ingredient_id.clone());
            missing.push(MissingIngredient {
                ingredient_id: ri.ingredient_id.clone(),
                name,
                required: ri.amount,
                available,
            });
        }
    }

    let scale_factor = match min_ratio {
        Some(ratio) => (ratio * recipe.batch_size).floor() as i64,
        // Nothing constrains production; report the count we can prove.
        None => 0,
    };

    InventoryReport {
        can_make: missing.is_empty(),
        missing,
        scale_factor,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::cost_per_unit;
    use crate::testing::assert_close;

    fn ingredient(id: &str, name: &str, price: f64, unit: &str) -> Ingredient {
        Ingredient {
            id: id.into(),
            name: name.into(),
            price,
            unit: unit.into(),
            amount: 1.0,
            contains_amount: None,
            contains_unit: None,
        }
    }

    fn bread_recipe() -> (Recipe, Vec<Ingredient>) {
        let ingredients = vec![
            ingredient("harina", "harina", 25.0, "kg"),
            ingredient("leche", "leche", 22.0, "l"),
        ];
        let recipe = Recipe {
            id: "r1".into(),
            name: "Concha".into(),
            ingredients: vec![
                RecipeIngredient {
                    ingredient_id: "harina".into(),
                    amount: 1.0,
                },
                RecipeIngredient {
                    ingredient_id: "leche".into(),
                    amount: 0.5,
                },
            ],
            tools: vec![],
            batch_size: 12.0,
            selling_price: 50.0,
        };
        (recipe, ingredients)
    }

    #[test]
    fn test_scale_recipe_doubles_amounts_and_price() {
        let (recipe, ingredients) = bread_recipe();
        let doubled = scale_recipe(&recipe, &ingredients, 24.0);

        assert_close(doubled.batch_size, 24.0, 1e-9);
        assert_close(doubled.ingredients[0].amount, 2.0, 1e-9);
        assert_close(doubled.ingredients[1].amount, 1.0, 1e-9);
        assert_close(doubled.selling_price, 100.0, 1e-9);

        // Original is untouched.
        assert_close(recipe.ingredients[0].amount, 1.0, 1e-9);
        assert_close(recipe.selling_price, 50.0, 1e-9);
    }

    #[test]
    fn test_scaling_keeps_cost_per_unit_invariant() {
        let (recipe, ingredients) = bread_recipe();
        let before = cost_per_unit(&recipe, &ingredients, &[]);
        let doubled = scale_recipe(&recipe, &ingredients, 24.0);
        let after = cost_per_unit(&doubled, &ingredients, &[]);
        assert_close(before, after, 1e-9);
    }

    #[test]
    fn test_scale_unresolved_reference_passes_through() {
        let (mut recipe, ingredients) = bread_recipe();
        recipe.ingredients.push(RecipeIngredient {
            ingredient_id: "desconocido".into(),
            amount: 3.0,
        });
        let doubled = scale_recipe(&recipe, &ingredients, 24.0);
        assert_close(doubled.ingredients[2].amount, 3.0, 1e-9);
    }

    #[test]
    fn test_scale_with_nonpositive_batch_size() {
        let (mut recipe, ingredients) = bread_recipe();
        recipe.batch_size = 0.0;
        let scaled = scale_recipe(&recipe, &ingredients, 10.0);
        assert_close(scaled.batch_size, 10.0, 1e-9);
        assert_close(scaled.ingredients[0].amount, 1.0, 1e-9);
        assert_close(scaled.selling_price, 50.0, 1e-9);
    }

    #[test]
    fn test_convert_recipe_units() {
        let (recipe, ingredients) = bread_recipe();
        let targets = HashMap::from([
            ("harina".to_string(), "g".to_string()),
            ("leche".to_string(), "cup".to_string()),
        ]);

        let converted = convert_recipe_units(&recipe, &ingredients, &targets);
        assert_close(converted.ingredients[0].amount, 1000.0, 1e-9);
        assert_close(converted.ingredients[1].amount, 0.5 * 4.22675, 1e-9);
    }

    #[test]
    fn test_convert_recipe_units_failure_leaves_amount() {
        let (recipe, ingredients) = bread_recipe();
        // harina is a weight; "ml" is incompatible without a density path.
        let targets = HashMap::from([("harina".to_string(), "ml".to_string())]);
        let converted = convert_recipe_units(&recipe, &ingredients, &targets);
        assert_close(converted.ingredients[0].amount, 1.0, 1e-9);
        // leche had no target requested.
        assert_close(converted.ingredients[1].amount, 0.5, 1e-9);
    }

    #[test]
    fn test_recipe_totals_skip_incompatible() {
        let (recipe, ingredients) = bread_recipe();
        // Only harina (1 kg → 1000 g) is weight-compatible; leche is skipped.
        let total = calculate_recipe_totals(&recipe, &ingredients, "g");
        assert_close(total, 1000.0, 1e-9);

        // In ml only leche contributes (0.5 l → 500 ml).
        let total = calculate_recipe_totals(&recipe, &ingredients, "ml");
        assert_close(total, 500.0, 1e-9);
    }

    #[test]
    fn test_check_inventory_bottleneck_scale_factor() {
        let (recipe, ingredients) = bread_recipe();
        let inventory = HashMap::from([
            ("harina".to_string(), 2.5),
            ("leche".to_string(), 4.0),
        ]);

        let report = check_inventory(&recipe, &ingredients, &inventory);
        assert!(report.can_make);
        assert!(report.missing.is_empty());
        // harina is the bottleneck: floor(2.5 / 1.0 × 12) = 30
        assert_eq!(report.scale_factor, 30);
    }

    #[test]
    fn test_check_inventory_collects_missing() {
        let (recipe, ingredients) = bread_recipe();
        let inventory = HashMap::from([
            ("harina".to_string(), 0.25),
            ("leche".to_string(), 4.0),
        ]);

        let report = check_inventory(&recipe, &ingredients, &inventory);
        assert!(!report.can_make);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].ingredient_id, "harina");
        assert_eq!(report.missing[0].name, "harina");
        assert_close(report.missing[0].required, 1.0, 1e-9);
        assert_close(report.missing[0].available, 0.25, 1e-9);
        // floor(0.25 × 12) = 3 units
        assert_eq!(report.scale_factor, 3);
    }

    #[test]
    fn test_check_inventory_absent_stock_is_zero() {
        let (recipe, ingredients) = bread_recipe();
        let inventory = HashMap::from([("harina".to_string(), 5.0)]);

        let report = check_inventory(&recipe, &ingredients, &inventory);
        assert!(!report.can_make);
        assert_eq!(report.scale_factor, 0);
        assert!(report
            .missing
            .iter()
            .any(|m| m.ingredient_id == "leche" && m.available == 0.0));
    }

    #[test]
    fn test_check_inventory_empty_recipe() {
        let recipe = Recipe {
            id: "r1".into(),
            name: "Nada".into(),
            ingredients: vec![],
            tools: vec![],
            batch_size: 12.0,
            selling_price: 1.0,
        };
        let report = check_inventory(&recipe, &[], &HashMap::new());
        assert!(report.can_make);
        assert_eq!(report.scale_factor, 0);
    }
}
