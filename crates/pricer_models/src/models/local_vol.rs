//! CEV local volatility.
//!
//! The local volatility function of the constant-elasticity-of-variance
//! model:
//! ```text
//! σ(x) = σ₀ · x^(β/2)
//! ```
//! At β = 2 this is lognormal (Black-Scholes) volatility; at β = 0 it is
//! absolute (Bachelier-style) volatility. The finite-difference engine
//! evaluates it at every grid node.

use crate::instruments::InstrumentError;

/// CEV local volatility `σ(x) = σ₀·x^(β/2)`.
///
/// # Examples
/// ```
/// use pricer_models::models::CevLocalVol;
///
/// let vol = CevLocalVol::new(0.2, 1.0).unwrap();
/// assert!((vol.volatility(4.0) - 0.4).abs() < 1e-12);
/// assert_eq!(vol.volatility(0.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CevLocalVol {
    sigma: f64,
    beta: f64,
}

impl CevLocalVol {
    /// Creates a CEV local volatility.
    ///
    /// # Arguments
    /// * `sigma` - Volatility scale σ₀ (must be positive)
    /// * `beta` - Variance elasticity, `0 <= β < 2`
    ///
    /// # Errors
    /// `InstrumentError::InvalidParameter` if either argument is out of range.
    pub fn new(sigma: f64, beta: f64) -> Result<Self, InstrumentError> {
        if sigma <= 0.0 || !sigma.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("volatility must be positive, got {}", sigma),
            });
        }
        if !(0.0..2.0).contains(&beta) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("CEV elasticity must lie in [0, 2), got {}", beta),
            });
        }
        Ok(Self { sigma, beta })
    }

    /// Returns the volatility scale σ₀.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the variance elasticity β.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the exponent applied to the level, `β/2`.
    #[inline]
    pub fn power(&self) -> f64 {
        0.5 * self.beta
    }

    /// Local volatility at level `x`. Negative levels are floored at zero.
    #[inline]
    pub fn volatility(&self, x: f64) -> f64 {
        self.sigma * x.max(0.0).powf(self.power())
    }

    /// Local variance `σ(x)²` at level `x`.
    #[inline]
    pub fn variance(&self, x: f64) -> f64 {
        let v = self.volatility(x);
        v * v
    }
}
