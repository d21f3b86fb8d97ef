//! Numerical building blocks shared by the pricing engines.
//!
//! - [`solvers`]: Banded linear solvers

pub mod solvers;
