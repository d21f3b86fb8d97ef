//! CLI error type.

use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::fdm::FdmError;
use pricer_pricing::mc::{ConfigError as McConfigError, McError};
use thiserror::Error;

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Contract or market data rejected.
    #[error("invalid instrument: {0}")]
    Instrument(#[from] InstrumentError),

    /// Closed-form pricer failed.
    #[error("analytical pricer: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Finite-difference engine failed.
    #[error("finite-difference engine: {0}")]
    Fdm(#[from] FdmError),

    /// Monte Carlo configuration rejected.
    #[error("simulation config: {0}")]
    SimulationConfig(#[from] McConfigError),

    /// Monte Carlo engine failed.
    #[error("simulation: {0}")]
    Simulation(#[from] McError),

    /// Report serialisation failed.
    #[error("output: {0}")]
    Output(#[from] serde_json::Error),

    /// Invalid combination of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
