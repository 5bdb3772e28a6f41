//! # Validation Module
//!
//! Invariant checks for caller-supplied records, run at the edge before
//! any costing or scaling math. The math itself degrades gracefully on
//! bad input (`0.0`, `None`); validation exists so UIs and the order
//! service can reject bad records with a typed reason instead.
//!
//! ## Usage
//! ```rust
//! use obrador_core::validation::validate_sale_line;
//! use obrador_core::types::SaleLine;
//!
//! let line = SaleLine { quantity: 2.0, unit_price: 50.0 };
//! validate_sale_line(&line).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{Ingredient, Recipe, SaleLine, Tool};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Records
// =============================================================================

/// Validates an ingredient record.
///
/// ## Rules
/// - `name` and `unit` must not be empty
/// - `price >= 0`
/// - `amount > 0` (it divides the price)
/// - `contains_amount`/`contains_unit` must be supplied together, and a
///   supplied `contains_amount` must be positive
pub fn validate_ingredient(ingredient: &Ingredient) -> ValidationResult<()> {
    if ingredient.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if ingredient.unit.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }
    if ingredient.price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }
    if ingredient.amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    match (&ingredient.contains_amount, &ingredient.contains_unit) {
        (Some(_), None) => {
            return Err(ValidationError::InvalidFormat {
                field: "contains_amount".to_string(),
                reason: "supplied without contains_unit".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(ValidationError::InvalidFormat {
                field: "contains_unit".to_string(),
                reason: "supplied without contains_amount".to_string(),
            })
        }
        (Some(amount), Some(_)) if *amount <= 0.0 => {
            return Err(ValidationError::MustBePositive {
                field: "contains_amount".to_string(),
            })
        }
        _ => {}
    }

    Ok(())
}

/// Validates a tool record.
///
/// ## Rules
/// - `name` and `category` must not be empty
/// - `total_investment >= 0`
pub fn validate_tool(tool: &Tool) -> ValidationResult<()> {
    if tool.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if tool.category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }
    if tool.total_investment < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "total_investment".to_string(),
        });
    }
    Ok(())
}

/// Validates a recipe record.
///
/// ## Rules
/// - `name` must not be empty
/// - `batch_size > 0` (it divides the batch cost)
/// - `selling_price >= 0`
/// - every referenced ingredient amount must be positive
pub fn validate_recipe(recipe: &Recipe) -> ValidationResult<()> {
    if recipe.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if recipe.batch_size <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "batch_size".to_string(),
        });
    }
    if recipe.selling_price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "selling_price".to_string(),
        });
    }
    for ri in &recipe.ingredients {
        if ri.amount <= 0.0 {
            return Err(ValidationError::MustBePositive {
                field: format!("ingredients[{}].amount", ri.ingredient_id),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Sale Lines
// =============================================================================

/// Validates one sale line before it enters the total arithmetic.
///
/// ## Rules
/// - `quantity > 0`
/// - `unit_price >= 0`
pub fn validate_sale_line(line: &SaleLine) -> ValidationResult<()> {
    if line.quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if line.unit_price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
