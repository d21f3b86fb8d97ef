//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Umbrella error every engine error converts into
//! - `SolverError`: Errors from the banded linear solvers

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode. Engine-specific errors
/// (finite-difference, Monte Carlo, analytical) convert into this type.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation broke down numerically
/// - `ModelFailure`: Model assumptions violated or result unavailable
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Linear solver errors.
///
/// Raised by the banded solvers when the system cannot be solved
/// reliably. These are never retried: a degenerate system stays
/// degenerate.
///
/// # Variants
/// - `DimensionMismatch`: Band or right-hand-side lengths disagree
/// - `SingularMatrix`: Elimination hit a (near-)zero pivot
/// - `NonFiniteSolution`: Elimination produced NaN or infinity
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::SingularMatrix { row: 3 };
/// assert!(format!("{}", err).contains("row 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Band or right-hand-side lengths are inconsistent.
    #[error("Dimension mismatch: expected {expected} entries, got {actual}")]
    DimensionMismatch {
        /// Expected length (the system size)
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Zero or near-zero pivot during elimination.
    #[error("Singular matrix: pivot vanished at row {row}")]
    SingularMatrix {
        /// Row at which the pivot vanished
        row: usize,
    },

    /// Elimination produced a non-finite value.
    #[error("Non-finite solution at row {row}")]
    NonFiniteSolution {
        /// First row holding a non-finite value
        row: usize,
    },
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::NumericalInstability(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = PricingError::InvalidInput("Test error".to_string());
        assert_eq!(format!("{}", err), "Invalid input: Test error");
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = PricingError::NumericalInstability("Singular system".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: Singular system");
    }

    #[test]
    fn test_model_failure_display() {
        let err = PricingError::ModelFailure("Rollback incomplete".to_string());
        assert_eq!(format!("{}", err), "Model failure: Rollback incomplete");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidInput("Test".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::DimensionMismatch {
            expected: 5,
            actual: 4,
        };
        assert_eq!(
            format!("{}", err),
            "Dimension mismatch: expected 5 entries, got 4"
        );

        let err = SolverError::NonFiniteSolution { row: 7 };
        assert_eq!(format!("{}", err), "Non-finite solution at row 7");
    }

    #[test]
    fn test_solver_error_into_pricing_error() {
        let err: PricingError = SolverError::SingularMatrix { row: 0 }.into();
        match err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("row 0")),
            _ => panic!("Expected NumericalInstability variant"),
        }
    }
}
