//! # Error Types
//!
//! The core deliberately does NOT use errors for conversion or costing
//! control flow: incompatible conversions are `None`, unresolved catalog
//! references contribute `0.0`, and degenerate divisions yield `0.0`
//! (see the module docs in `units` and `costing`).
//!
//! What remains is input validation at the edge — checking that records a
//! caller hands in satisfy the data-model invariants before any math runs.

use thiserror::Error;

/// Input validation errors.
///
/// These occur when a caller-supplied record doesn't meet the data-model
/// invariants. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive (amounts used as divisors).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive (prices, investments).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format or inconsistent combination of fields.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be positive");

        let err = ValidationError::InvalidFormat {
            field: "contains_amount".to_string(),
            reason: "supplied without contains_unit".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "contains_amount has invalid format: supplied without contains_unit"
        );
    }
}
