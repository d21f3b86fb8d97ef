//! Financial instrument definitions.
//!
//! This module provides:
//! - [`PayoffType`]: Terminal payoff functions (Call, Put)
//! - [`InstrumentParams`]: Validated strike and expiry
//! - [`EuropeanOption`]: A payoff bound to contract terms
//! - [`InstrumentError`]: Validation and valuation errors
//!
//! Market-aware instruments (spot, rates, volatility dynamics) live in
//! [`crate::market`].

mod error;
mod european;
mod params;
mod payoff;

pub use error::InstrumentError;
pub use european::EuropeanOption;
pub use params::InstrumentParams;
pub use payoff::PayoffType;
