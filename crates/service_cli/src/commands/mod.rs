//! CLI command implementations
//!
//! Each submodule implements a specific CLI command; the argument groups
//! shared between commands live here.

pub mod convergence;
pub mod price;

use clap::{Args, ValueEnum};
use pricer_models::instruments::{EuropeanOption, PayoffType};
use pricer_models::market::{BlackScholesInstrument, CevInstrument, MarketInstrument};
use pricer_pricing::fdm::{DriftConvention, FdmConfig, FdmError};

use crate::{CliError, Result};

pub use convergence::ConvergenceArgs;
pub use price::PriceArgs;

/// Payoff selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PayoffArg {
    /// max(S - K, 0)
    Call,
    /// max(K - S, 0)
    Put,
}

impl From<PayoffArg> for PayoffType {
    fn from(arg: PayoffArg) -> Self {
        match arg {
            PayoffArg::Call => PayoffType::Call,
            PayoffArg::Put => PayoffType::Put,
        }
    }
}

/// Dynamics of the underlying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    /// Lognormal dynamics
    BlackScholes,
    /// Constant elasticity of variance
    Cev,
}

/// Drift term of the finite-difference coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DriftArg {
    /// First-order coefficient equal to the rate
    Flat,
    /// First-order coefficient (r - q)·x
    Proportional,
}

impl From<DriftArg> for DriftConvention {
    fn from(arg: DriftArg) -> Self {
        match arg {
            DriftArg::Flat => DriftConvention::Flat,
            DriftArg::Proportional => DriftConvention::Proportional,
        }
    }
}

/// Engines to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Closed form only
    Analytical,
    /// Finite differences only
    Fdm,
    /// Monte Carlo only
    Mc,
    /// Every engine
    All,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned text table
    Table,
    /// JSON document
    Json,
}

/// Contract and market arguments.
#[derive(Args, Clone, Debug)]
pub struct ContractArgs {
    /// Option payoff
    #[arg(long, value_enum, default_value_t = PayoffArg::Put)]
    pub payoff: PayoffArg,

    /// Spot level
    #[arg(long, default_value_t = 30.0)]
    pub spot: f64,

    /// Strike
    #[arg(long, default_value_t = 30.0)]
    pub strike: f64,

    /// Expiry in years
    #[arg(long, default_value_t = 1.0)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    pub dividend: f64,

    /// Base volatility
    #[arg(long, default_value_t = 0.2)]
    pub volatility: f64,

    /// CEV elasticity in [0, 2)
    #[arg(long, default_value_t = 1.9999)]
    pub beta: f64,

    /// Dynamics used by the closed form and the Monte Carlo engine
    #[arg(long, value_enum, default_value_t = ModelArg::Cev)]
    pub model: ModelArg,
}

impl ContractArgs {
    /// Builds the market instrument.
    pub fn instrument(&self) -> Result<MarketInstrument> {
        let option = EuropeanOption::new(self.payoff.into(), self.strike, self.expiry)?;
        let instrument = match self.model {
            ModelArg::BlackScholes => {
                BlackScholesInstrument::new(option, self.spot, self.rate, self.volatility)?
                    .with_dividend(self.dividend)
                    .into()
            }
            ModelArg::Cev => {
                CevInstrument::new(option, self.spot, self.rate, self.volatility, self.beta)?
                    .with_dividend(self.dividend)
                    .into()
            }
        };
        Ok(instrument)
    }
}

/// Finite-difference grid arguments.
#[derive(Args, Clone, Debug)]
pub struct GridArgs {
    /// Number of time steps
    #[arg(long, default_value_t = 300)]
    pub time_steps: usize,

    /// Nodes on each side of spot
    #[arg(long, default_value_t = 300)]
    pub space_steps: usize,

    /// Explicit weight: 0 implicit, 0.5 Crank-Nicolson, 1 explicit
    #[arg(long, default_value_t = 0.5)]
    pub theta: f64,

    /// Drift term of the coefficients
    #[arg(long, value_enum, default_value_t = DriftArg::Proportional)]
    pub drift: DriftArg,

    /// Lower edge of the price domain (default 0)
    #[arg(long, requires = "domain_max")]
    pub domain_min: Option<f64>,

    /// Upper edge of the price domain (default 2·strike)
    #[arg(long, requires = "domain_min")]
    pub domain_max: Option<f64>,
}

impl GridArgs {
    /// Builds the engine configuration for elasticity `beta`.
    pub fn config(&self, beta: f64) -> Result<FdmConfig> {
        self.config_with_steps(beta, self.time_steps, self.space_steps)
    }

    /// As [`GridArgs::config`] with explicit step counts.
    pub fn config_with_steps(
        &self,
        beta: f64,
        time_steps: usize,
        space_steps: usize,
    ) -> Result<FdmConfig> {
        let mut builder = FdmConfig::builder()
            .time_steps(time_steps)
            .space_steps(space_steps)
            .theta(self.theta)
            .beta(beta)
            .drift(self.drift.into());
        match (self.domain_min, self.domain_max) {
            (Some(min), Some(max)) => builder = builder.with_domain(min, max),
            (None, None) => {}
            _ => {
                return Err(CliError::InvalidArgument(
                    "--domain-min and --domain-max must be given together".to_string(),
                ))
            }
        }
        builder
            .build()
            .map_err(|err| CliError::Fdm(FdmError::from(err)))
    }
}
