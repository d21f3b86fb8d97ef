//! Closed-form CEV prices for European options.
//!
//! Under the constant-elasticity-of-variance model the underlying follows
//!
//! ```text
//! dS = (r - q)·S·dt + λ·S^(β/2)·dW,    0 <= β < 2
//! ```
//!
//! and European prices reduce to non-central chi-square probabilities
//! (Schroder's formulas). With `p = β/2`:
//!
//! ```text
//! v  = λ²·(e^(2(r-q)(p-1)T) - 1) / (2(r-q)(p-1))     (λ²T when r = q)
//! a  = (K·e^(-(r-q)T))^(2(1-p)) / ((1-p)²·v)
//! b  = 1 / |1 - p|
//! c  = S^(2(1-p)) / ((1-p)²·v)
//!
//! C = S·e^(-qT)·(1 - χ(a; b+2, c)) - K·e^(-rT)·χ(c; b, a)
//! P = K·e^(-rT)·(1 - χ(c; b, a)) - S·e^(-qT)·χ(a; b+2, c)
//! ```
//!
//! where `χ(z; k, v)` is [`noncentral_chi2_cdf`]. As β → 2 the prices
//! converge to Black-Scholes with volatility λ.

use super::distributions::noncentral_chi2_cdf;
use super::error::AnalyticalError;
use crate::instruments::PayoffType;

/// Below this |r - q| the variance integral uses its zero-carry limit.
const CARRY_EPSILON: f64 = 1e-12;

/// Analytical CEV pricer.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholes, CevAnalytic};
///
/// // Elasticity close to 2 recovers Black-Scholes
/// let cev = CevAnalytic::new(30.0, 0.05, 0.2, 1.9999).unwrap();
/// let bs = BlackScholes::new(30.0, 0.05, 0.2).unwrap();
///
/// let put = cev.price_put(30.0, 1.0).unwrap();
/// assert!((put - bs.price_put(30.0, 1.0)).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CevAnalytic {
    spot: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    beta: f64,
}

impl CevAnalytic {
    /// Creates a new CEV pricer with zero dividend yield.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate
    /// * `volatility` - Volatility scale λ (must be positive)
    /// * `beta` - Variance elasticity, `0 <= β < 2`
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    /// - `AnalyticalError::InvalidElasticity` if β is outside `[0, 2)`
    pub fn new(spot: f64, rate: f64, volatility: f64, beta: f64) -> Result<Self, AnalyticalError> {
        if spot <= 0.0 || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if volatility <= 0.0 || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        if !(0.0..2.0).contains(&beta) {
            return Err(AnalyticalError::InvalidElasticity { beta });
        }
        Ok(Self {
            spot,
            rate,
            dividend: 0.0,
            volatility,
            beta,
        })
    }

    /// Sets the continuous dividend yield.
    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.dividend = dividend;
        self
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the variance elasticity β.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the chi-square probabilities `(χ(a; b+2, c), χ(c; b, a))`.
    fn probabilities(&self, strike: f64, expiry: f64) -> Result<(f64, f64), AnalyticalError> {
        let p = 0.5 * self.beta;
        let one_minus_p = 1.0 - p;
        let carry = self.rate - self.dividend;
        let lambda_sq = self.volatility * self.volatility;

        let variance = if carry.abs() < CARRY_EPSILON {
            lambda_sq * expiry
        } else {
            let k = 2.0 * carry * (p - 1.0);
            lambda_sq * ((k * expiry).exp() - 1.0) / k
        };
        let scale = one_minus_p * one_minus_p * variance;

        let a = (strike * (-carry * expiry).exp()).powf(2.0 * one_minus_p) / scale;
        let b = 1.0 / one_minus_p.abs();
        let c = self.spot.powf(2.0 * one_minus_p) / scale;

        let upper = noncentral_chi2_cdf(a, b + 2.0, c);
        let lower = noncentral_chi2_cdf(c, b, a);
        if !upper.is_finite() || !lower.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!(
                    "chi-square approximation failed (a = {}, b = {}, c = {})",
                    a, b, c
                ),
            });
        }
        Ok((upper, lower))
    }

    /// Computes European call option price.
    ///
    /// # Errors
    /// Returns `AnalyticalError::NumericalInstability` if the chi-square
    /// approximation produces a non-finite probability.
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(PayoffType::Call, strike, expiry)
    }

    /// Computes European put option price.
    ///
    /// # Errors
    /// Returns `AnalyticalError::NumericalInstability` if the chi-square
    /// approximation produces a non-finite probability.
    pub fn price_put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(PayoffType::Put, strike, expiry)
    }

    /// Prices by payoff type. Expired options return intrinsic value.
    pub fn price(
        &self,
        payoff_type: PayoffType,
        strike: f64,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        if expiry <= 0.0 {
            return Ok(payoff_type.evaluate(self.spot, strike));
        }

        let (upper, lower) = self.probabilities(strike, expiry)?;
        let forward = self.spot * (-self.dividend * expiry).exp();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        Ok(match payoff_type {
            PayoffType::Call => forward * (1.0 - upper) - discounted_strike * lower,
            PayoffType::Put => discounted_strike * (1.0 - lower) - forward * upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            CevAnalytic::new(0.0, 0.05, 0.2, 1.0),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            CevAnalytic::new(30.0, 0.05, 0.0, 1.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            CevAnalytic::new(30.0, 0.05, 0.2, 2.0),
            Err(AnalyticalError::InvalidElasticity { .. })
        ));
        assert!(CevAnalytic::new(30.0, 0.05, 0.2, -0.5).is_err());
    }

    #[test]
    fn test_near_lognormal_matches_black_scholes() {
        let cev = CevAnalytic::new(30.0, 0.05, 0.2, 1.9999).unwrap();
        let bs = BlackScholes::new(30.0, 0.05, 0.2).unwrap();

        assert_relative_eq!(
            cev.price_put(30.0, 1.0).unwrap(),
            bs.price_put(30.0, 1.0),
            epsilon = 1e-3
        );
        assert_relative_eq!(
            cev.price_call(30.0, 1.0).unwrap(),
            bs.price_call(30.0, 1.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_square_root_process_reference() {
        // β = 1 with λ chosen so the local volatility at spot is 20%
        let cev = CevAnalytic::new(30.0, 0.05, 0.2 * 30.0_f64.sqrt(), 1.0).unwrap();
        assert_relative_eq!(cev.price_put(30.0, 1.0).unwrap(), 1.67045, epsilon = 1e-4);
        assert_relative_eq!(cev.price_call(30.0, 1.0).unwrap(), 3.13357, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity() {
        let cev = CevAnalytic::new(30.0, 0.05, 0.2 * 30.0_f64.powf(0.25), 1.5)
            .unwrap()
            .with_dividend(0.01);
        for strike in [25.0, 30.0, 35.0] {
            let call = cev.price_call(strike, 1.0).unwrap();
            let put = cev.price_put(strike, 1.0).unwrap();
            let forward = 30.0 * (-0.01_f64).exp() - strike * (-0.05_f64).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_zero_carry_limit() {
        // r = q takes the λ²T branch; the forward is then driftless
        let cev = CevAnalytic::new(30.0, 0.05, 0.2 * 30.0_f64.sqrt(), 1.0)
            .unwrap()
            .with_dividend(0.05);
        let call = cev.price_call(30.0, 1.0).unwrap();
        let put = cev.price_put(30.0, 1.0).unwrap();
        assert_relative_eq!(call, put, epsilon = 1e-10);
        assert_relative_eq!(call, 2.27108, epsilon = 1e-4);
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let cev = CevAnalytic::new(30.0, 0.05, 1.0, 1.0).unwrap();
        assert_eq!(cev.price_call(25.0, 0.0).unwrap(), 5.0);
        assert_eq!(cev.price_put(25.0, 0.0).unwrap(), 0.0);
    }
}
