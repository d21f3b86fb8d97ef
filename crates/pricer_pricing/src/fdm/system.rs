//! Banded system assembly and solve.

use pricer_core::math::solvers::TridiagonalSolver;
use pricer_core::types::SolverError;

use super::coefficients::CoefficientBuilder;
use super::grid::PriceGrid;

/// Tridiagonal system `M·v = rhs` over the price grid.
///
/// Row layout:
/// - row 0: `b(x₀)` on the diagonal, `c(x₁)` above it
/// - interior row j: `a(xⱼ)`, `b(xⱼ)`, `c(xⱼ)`
/// - last row: `a(x_{2Nj})` below the diagonal, `b(x_{2Nj+1})` on it,
///   reading the clamped virtual node past the top of the grid
#[derive(Debug, Clone)]
pub struct TridiagonalSystem {
    lower: Vec<f64>,
    diag: Vec<f64>,
    upper: Vec<f64>,
    solver: TridiagonalSolver<f64>,
}

impl TridiagonalSystem {
    /// Allocates a system for `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
            solver: TridiagonalSolver::new(n),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Whether the system has no rows.
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Sub-diagonal band (`lower[0]` unused).
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Main diagonal.
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    /// Super-diagonal band (last entry unused).
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Fills the bands from the grid and coefficients.
    pub fn assemble(&mut self, grid: &PriceGrid, coefficients: &CoefficientBuilder) {
        let n = self.diag.len();
        if n < 2 {
            return;
        }
        let last = n - 1;

        self.lower[0] = 0.0;
        self.diag[0] = coefficients.matrix(grid.level(0)).b;
        self.upper[0] = coefficients.matrix(grid.level(1)).c;

        for j in 1..last {
            let m = coefficients.matrix(grid.level(j));
            self.lower[j] = m.a;
            self.diag[j] = m.b;
            self.upper[j] = m.c;
        }

        self.lower[last] = coefficients.matrix(grid.level(last)).a;
        self.diag[last] = coefficients.matrix(grid.level(last + 1)).b;
        self.upper[last] = 0.0;
    }

    /// Solves `M·out = rhs`.
    ///
    /// # Errors
    /// Propagates `SolverError` from the Thomas solver.
    pub fn solve(&mut self, rhs: &[f64], out: &mut [f64]) -> Result<(), SolverError> {
        self.solver
            .solve(&self.lower, &self.diag, &self.upper, rhs, out)
    }
}
