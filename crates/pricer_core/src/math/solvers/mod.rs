//! Linear solvers for banded systems.
//!
//! Finite-difference schemes produce one tridiagonal system per time
//! step. Solving it with a dense factorisation costs `O(n³)`; the Thomas
//! algorithm exploits the band structure for `O(n)`.
//!
//! ## Available Solvers
//!
//! - [`TridiagonalSolver`]: Thomas algorithm with reusable scratch buffers
//! - [`solve_tridiagonal`]: One-off allocating wrapper
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::TridiagonalSolver;
//!
//! let mut solver = TridiagonalSolver::new(2);
//! let mut x = [0.0_f64; 2];
//! solver
//!     .solve(&[0.0, 1.0], &[3.0, 3.0], &[1.0, 0.0], &[4.0, 4.0], &mut x)
//!     .unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! ```

mod tridiagonal;

pub use tridiagonal::{solve_tridiagonal, TridiagonalSolver, PIVOT_TOLERANCE};
