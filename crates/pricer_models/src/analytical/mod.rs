//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form reference prices:
//! - [`BlackScholes`]: lognormal dynamics with a continuous dividend yield
//! - [`CevAnalytic`]: constant-elasticity-of-variance dynamics
//! - [`distributions`]: normal and non-central chi-square distribution functions

pub mod black_scholes;
pub mod cev;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholes;
pub use cev::CevAnalytic;
pub use distributions::{noncentral_chi2_cdf, norm_cdf, norm_inv_cdf};
pub use error::AnalyticalError;
