//! # pricer_core: Numerical Foundation for the CEV Pricing Workspace
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-layer architecture, providing:
//! - Banded linear solvers (`math::solvers`)
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::solve_tridiagonal;
//! use pricer_core::types::PricingError;
//!
//! let x = solve_tridiagonal(&[0.0_f64, 1.0], &[2.0, 2.0], &[1.0, 0.0], &[3.0, 3.0])
//!     .map_err(PricingError::from)
//!     .unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `SolverError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
