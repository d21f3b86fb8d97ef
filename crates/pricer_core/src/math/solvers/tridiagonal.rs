//! Thomas algorithm for tridiagonal linear systems.

use crate::types::SolverError;
use num_traits::Float;

/// Pivots with magnitude at or below this value are treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1.0e-14;

/// Reusable tridiagonal (Thomas) solver.
///
/// Solves `A·x = d` for a tridiagonal `A` stored as three bands in
/// `O(n)` time. Row `i` reads `lower[i]·x[i-1] + diag[i]·x[i] + upper[i]·x[i+1]`,
/// so `lower[0]` and `upper[n-1]` are ignored.
///
/// The forward-sweep scratch buffers are owned by the solver and reused
/// across calls, so repeated solves of the same size do not allocate.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::TridiagonalSolver;
///
/// // [ 2 1 0 ] [x0]   [ 3 ]
/// // [ 1 2 1 ] [x1] = [ 4 ]
/// // [ 0 1 2 ] [x2]   [ 3 ]
/// let lower = [0.0_f64, 1.0, 1.0];
/// let diag = [2.0, 2.0, 2.0];
/// let upper = [1.0, 1.0, 0.0];
/// let rhs = [3.0, 4.0, 3.0];
///
/// let mut solver = TridiagonalSolver::new(3);
/// let mut x = [0.0; 3];
/// solver.solve(&lower, &diag, &upper, &rhs, &mut x).unwrap();
///
/// for xi in x {
///     assert!((xi - 1.0).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalSolver<T: Float> {
    c_star: Vec<T>,
    d_star: Vec<T>,
}

impl<T: Float> TridiagonalSolver<T> {
    /// Creates a solver with scratch space for systems of size `n`.
    ///
    /// The buffers grow on demand if a larger system is solved later.
    pub fn new(n: usize) -> Self {
        Self {
            c_star: vec![T::zero(); n],
            d_star: vec![T::zero(); n],
        }
    }

    /// Solves the system, writing the solution into `x`.
    ///
    /// # Arguments
    ///
    /// * `lower` - Sub-diagonal band (`lower[0]` unused)
    /// * `diag` - Main diagonal
    /// * `upper` - Super-diagonal band (`upper[n-1]` unused)
    /// * `rhs` - Right-hand side
    /// * `x` - Output buffer
    ///
    /// # Errors
    ///
    /// - `SolverError::DimensionMismatch` if any slice length differs from `diag.len()`
    /// - `SolverError::SingularMatrix` if a pivot vanishes during the forward sweep
    /// - `SolverError::NonFiniteSolution` if the back substitution yields NaN/inf
    pub fn solve(
        &mut self,
        lower: &[T],
        diag: &[T],
        upper: &[T],
        rhs: &[T],
        x: &mut [T],
    ) -> Result<(), SolverError> {
        let n = diag.len();
        for len in [lower.len(), upper.len(), rhs.len(), x.len()] {
            if len != n {
                return Err(SolverError::DimensionMismatch {
                    expected: n,
                    actual: len,
                });
            }
        }
        if n == 0 {
            return Ok(());
        }
        if self.c_star.len() < n {
            self.c_star.resize(n, T::zero());
            self.d_star.resize(n, T::zero());
        }

        let tolerance = T::from(PIVOT_TOLERANCE).unwrap_or_else(T::epsilon);
        let pivot_ok = |p: T| p.is_finite() && p.abs() > tolerance;

        if !pivot_ok(diag[0]) {
            return Err(SolverError::SingularMatrix { row: 0 });
        }
        let inv = T::one() / diag[0];
        self.c_star[0] = if n > 1 { upper[0] * inv } else { T::zero() };
        self.d_star[0] = rhs[0] * inv;

        for i in 1..n {
            let denom = diag[i] - lower[i] * self.c_star[i - 1];
            if !pivot_ok(denom) {
                return Err(SolverError::SingularMatrix { row: i });
            }
            let inv = T::one() / denom;
            self.c_star[i] = if i + 1 < n { upper[i] * inv } else { T::zero() };
            self.d_star[i] = (rhs[i] - lower[i] * self.d_star[i - 1]) * inv;
        }

        x[n - 1] = self.d_star[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = self.d_star[i] - self.c_star[i] * x[i + 1];
        }

        match x.iter().position(|v| !v.is_finite()) {
            Some(row) => Err(SolverError::NonFiniteSolution { row }),
            None => Ok(()),
        }
    }
}

/// Solves a tridiagonal system into a freshly allocated vector.
///
/// Convenience wrapper over [`TridiagonalSolver`] for one-off solves.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::solve_tridiagonal;
///
/// let x = solve_tridiagonal(&[0.0_f64, -1.0], &[2.0, 2.0], &[-1.0, 0.0], &[1.0, 1.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
pub fn solve_tridiagonal<T: Float>(
    lower: &[T],
    diag: &[T],
    upper: &[T],
    rhs: &[T],
) -> Result<Vec<T>, SolverError> {
    let mut x = vec![T::zero(); diag.len()];
    TridiagonalSolver::new(diag.len()).solve(lower, diag, upper, rhs, &mut x)?;
    Ok(x)
}
