//! Core error types.
//!
//! - `error`: Structured error types for pricing and linear-solver operations
//!
//! # Re-exports
//!
//! [`PricingError`] and [`SolverError`] are re-exported at this module level.

pub mod error;

pub use error::{PricingError, SolverError};
