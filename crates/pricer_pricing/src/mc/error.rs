//! Error types for the Monte Carlo engine.
//!
//! Configuration errors are raised when a [`SimulationConfig`] is built;
//! run-time errors come from the instrument's valuation of a realisation.
//!
//! [`SimulationConfig`]: super::SimulationConfig

use std::fmt;

use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Configuration error for the Monte Carlo engine.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Simulation count outside `[1, 10_000_000]`.
    InvalidSimulationCount(usize),
    /// Confidence level outside the open interval `(0, 1)`.
    InvalidConfidenceLevel(f64),
    /// Snapshot interval of zero.
    InvalidSnapshotInterval(usize),
    /// Accuracy goal not strictly positive.
    InvalidGoal(f64),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSimulationCount(count) => write!(
                f,
                "Invalid simulation count {}: must be in range [1, 10_000_000]",
                count
            ),
            Self::InvalidConfidenceLevel(level) => write!(
                f,
                "Invalid confidence level {}: must lie strictly between 0 and 1",
                level
            ),
            Self::InvalidSnapshotInterval(interval) => {
                write!(f, "Invalid snapshot interval {}: must be positive", interval)
            }
            Self::InvalidGoal(goal) => {
                write!(f, "Invalid accuracy goal {}: must be positive", goal)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by [`Simulation::run`](super::Simulation::run).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The instrument could not value a realisation.
    #[error("simulation {simulation}: {source}")]
    Valuation {
        /// Zero-based index of the failing simulation.
        simulation: usize,
        /// Underlying instrument error.
        #[source]
        source: InstrumentError,
    },

    /// A realisation valued to NaN or infinity.
    #[error("simulation {simulation} produced a non-finite value")]
    NonFinite {
        /// Zero-based index of the failing simulation.
        simulation: usize,
    },
}

impl From<McError> for PricingError {
    fn from(err: McError) -> Self {
        match err {
            McError::Config(_) => PricingError::InvalidInput(err.to_string()),
            McError::Valuation { .. } => PricingError::ModelFailure(err.to_string()),
            McError::NonFinite { .. } => PricingError::NumericalInstability(err.to_string()),
        }
    }
}
