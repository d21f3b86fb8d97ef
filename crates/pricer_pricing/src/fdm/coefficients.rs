//! Theta-scheme coefficients.
//!
//! For drift `mu(x)` and local volatility `σ(x)` the scheme couples three
//! neighbouring nodes. The implicit (matrix) side is weighted by `1 - θ`,
//! the explicit (right-hand) side by `θ`:
//!
//! ```text
//! a(x) = (1-θ)·( mu - σ²/dx) / (2dx)      α(x) = -θ·( mu - σ²/dx) / (2dx)
//! b(x) = 1/dt + (1-θ)·(r + σ²/dx²)        β(x) = 1/dt - θ·(r + σ²/dx²)
//! c(x) = (1-θ)·(-mu - σ²/dx) / (2dx)      γ(x) =  θ·( mu + σ²/dx) / (2dx)
//! ```
//!
//! All coefficients are pure functions of the (clamped) level.

use pricer_models::models::CevLocalVol;

use super::config::DriftConvention;

/// Matrix-side coefficients for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCoefficients {
    /// Sub-diagonal
    pub a: f64,
    /// Diagonal
    pub b: f64,
    /// Super-diagonal
    pub c: f64,
}

/// Right-hand-side coefficients for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhsCoefficients {
    /// Weight of the left neighbour
    pub alpha: f64,
    /// Weight of the node itself
    pub beta: f64,
    /// Weight of the right neighbour
    pub gamma: f64,
}

/// Evaluates scheme coefficients at grid levels.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientBuilder {
    theta: f64,
    dt: f64,
    dx: f64,
    rate: f64,
    carry: f64,
    drift: DriftConvention,
    local_vol: CevLocalVol,
}

impl CoefficientBuilder {
    /// Creates a coefficient builder.
    ///
    /// # Arguments
    /// * `theta` - Scheme weight in `[0, 1]`
    /// * `dt`, `dx` - Time and space steps
    /// * `rate` - Risk-free rate r (discounting term)
    /// * `carry` - Risk-neutral drift r - q (proportional drift only)
    /// * `drift` - Drift convention
    /// * `local_vol` - Local volatility function
    pub fn new(
        theta: f64,
        dt: f64,
        dx: f64,
        rate: f64,
        carry: f64,
        drift: DriftConvention,
        local_vol: CevLocalVol,
    ) -> Self {
        Self {
            theta,
            dt,
            dx,
            rate,
            carry,
            drift,
            local_vol,
        }
    }

    /// Drift term at level `x`.
    #[inline]
    pub fn mu(&self, x: f64) -> f64 {
        self.drift.drift(self.rate, self.carry, x)
    }

    /// Matrix-side coefficients `(a, b, c)` at level `x`.
    #[inline]
    pub fn matrix(&self, x: f64) -> MatrixCoefficients {
        let w = 1.0 - self.theta;
        let mu = self.mu(x);
        let var = self.local_vol.variance(x);
        let dx = self.dx;
        MatrixCoefficients {
            a: w * (mu - var / dx) / (2.0 * dx),
            b: 1.0 / self.dt + w * (self.rate + var / (dx * dx)),
            c: w * (-mu - var / dx) / (2.0 * dx),
        }
    }

    /// Right-hand-side coefficients `(α, β, γ)` at level `x`.
    #[inline]
    pub fn rhs(&self, x: f64) -> RhsCoefficients {
        let w = self.theta;
        let mu = self.mu(x);
        let var = self.local_vol.variance(x);
        let dx = self.dx;
        RhsCoefficients {
            alpha: -w * (mu - var / dx) / (2.0 * dx),
            beta: 1.0 / self.dt - w * (self.rate + var / (dx * dx)),
            gamma: w * (mu + var / dx) / (2.0 * dx),
        }
    }
}
