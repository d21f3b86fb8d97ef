//! Theta-scheme finite-difference engine for local-volatility diffusions.
//!
//! Prices a European payoff by rolling the terminal payoff back to time
//! zero on a uniform price grid centred on spot. Each step assembles a
//! tridiagonal system from the [`CoefficientBuilder`], solves it with the
//! Thomas algorithm and applies the [`BoundaryConditions`].
//!
//! | `theta` | Scheme         |
//! |---------|----------------|
//! | 0.0     | Fully implicit |
//! | 0.5     | Crank-Nicolson |
//! | 1.0     | Explicit       |
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::{EuropeanOption, PayoffType};
//! use pricer_models::market::{CevInstrument, MarketInstrument};
//! use pricer_pricing::fdm::{FdmConfig, FdmEngine};
//!
//! let put = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
//! let sigma = 0.2 * 30.0_f64.sqrt();
//! let instrument: MarketInstrument =
//!     CevInstrument::new(put, 30.0, 0.05, sigma, 1.0).unwrap().into();
//!
//! let config = FdmConfig::builder()
//!     .time_steps(200)
//!     .space_steps(200)
//!     .beta(1.0)
//!     .build()
//!     .unwrap();
//!
//! let fdm = FdmEngine::run(&instrument, config).unwrap();
//! let closed_form = instrument.analytical_npv().unwrap();
//! assert!((fdm - closed_form).abs() < 1e-2);
//! ```

mod boundary;
mod coefficients;
mod config;
mod engine;
mod error;
mod grid;
mod system;

pub use boundary::BoundaryConditions;
pub use coefficients::{CoefficientBuilder, MatrixCoefficients, RhsCoefficients};
pub use config::{DriftConvention, FdmConfig, FdmConfigBuilder};
pub use engine::{FdmEngine, RollbackState};
pub use error::{ConfigError, FdmError};
pub use grid::PriceGrid;
pub use system::TridiagonalSystem;
