//! Error types for the finite-difference engine.
//!
//! - [`ConfigError`]: invalid engine configuration, raised before any grid work
//! - [`FdmError`]: everything that can stop a rollback

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Finite-difference configuration error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Zero time steps.
    #[error("Invalid time step count {0}: must be at least 1")]
    InvalidTimeSteps(usize),

    /// Zero space steps on either side of spot.
    #[error("Invalid space step count {0}: must be at least 1")]
    InvalidSpaceSteps(usize),

    /// Theta outside `[0, 1]`.
    #[error("Invalid theta {0}: must lie in [0, 1]")]
    InvalidTheta(f64),

    /// CEV elasticity outside `[0, 2)`.
    #[error("Invalid CEV elasticity {0}: must lie in [0, 2)")]
    InvalidBeta(f64),

    /// Price domain that does not bracket spot.
    #[error("Invalid domain [{min}, {max}] for spot {spot}")]
    InvalidDomain {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Spot level
        spot: f64,
    },

    /// Instrument or model parameters the engine cannot use.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

/// Errors raised by the finite-difference engine.
///
/// Numerical failures are fatal for the run: the engine never retries and
/// never reports a partial price.
///
/// # Examples
/// ```
/// use pricer_pricing::fdm::FdmError;
/// use pricer_core::types::PricingError;
///
/// let err: PricingError = FdmError::NotRolledBack.into();
/// assert!(matches!(err, PricingError::ModelFailure(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FdmError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The banded system could not be solved.
    #[error("Solver failure at step {step}: {source}")]
    Numerical {
        /// Rollback index at which the solve failed
        step: usize,
        /// Underlying solver error
        #[source]
        source: SolverError,
    },

    /// The right-hand side or extracted price overflowed.
    #[error("Non-finite values at step {step}")]
    NonFinite {
        /// Rollback index at which the overflow was detected
        step: usize,
    },

    /// Price requested before the rollback reached time zero.
    #[error("Rollback has not completed")]
    NotRolledBack,

    /// The run was aborted by an earlier numerical failure.
    #[error("Rollback aborted by an earlier failure")]
    Aborted,
}

impl From<FdmError> for PricingError {
    fn from(err: FdmError) -> Self {
        match err {
            FdmError::Config(_) => PricingError::InvalidInput(err.to_string()),
            FdmError::Numerical { .. } | FdmError::NonFinite { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            FdmError::NotRolledBack | FdmError::Aborted => {
                PricingError::ModelFailure(err.to_string())
            }
        }
    }
}
