//! Payoff type definitions.
//!
//! This module provides the terminal payoff functions (Call, Put) that
//! every engine evaluates: the PDE engine at grid nodes, the Monte Carlo
//! engine at simulated terminal levels.

use std::fmt;

use num_traits::Float;

/// Type of option payoff.
///
/// A pure function of the underlying level to a non-negative cash amount.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// let call = PayoffType::Call;
/// assert_eq!(call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Evaluate the payoff for given underlying level and strike.
    ///
    /// # Arguments
    /// * `spot` - Underlying level (S)
    /// * `strike` - Strike price (K)
    ///
    /// # Returns
    /// The payoff, never negative.
    #[inline]
    pub fn evaluate<T: Float>(&self, spot: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            PayoffType::Call => (spot - strike).max(zero),
            PayoffType::Put => (strike - spot).max(zero),
        }
    }

    /// Returns whether this payoff is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this payoff is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }

    /// Lower-case name used in logs ("call" / "put").
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            PayoffType::Call => "call",
            PayoffType::Put => "put",
        }
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_put_payoff() {
        let put = PayoffType::Put;
        assert_eq!(put.evaluate(10.0_f64, 5.0), 0.0);
        assert_eq!(put.evaluate(2.0_f64, 5.0), 3.0);
    }

    #[test]
    fn test_call_payoff() {
        let call = PayoffType::Call;
        assert_eq!(call.evaluate(13.0_f64, 5.0), 8.0);
        assert_eq!(call.evaluate(3.0_f64, 5.0), 0.0);
    }

    #[test]
    fn test_at_the_money_is_zero() {
        assert_eq!(PayoffType::Call.evaluate(100.0_f64, 100.0), 0.0);
        assert_eq!(PayoffType::Put.evaluate(100.0_f64, 100.0), 0.0);
    }

    #[test]
    fn test_classification() {
        assert!(PayoffType::Call.is_call());
        assert!(!PayoffType::Call.is_put());
        assert!(PayoffType::Put.is_put());
        assert_eq!(PayoffType::Put.to_string(), "put");
        assert_eq!(PayoffType::Call.name(), "call");
    }

    proptest! {
        #[test]
        fn prop_payoff_non_negative(spot in 0.0f64..1000.0, strike in 0.01f64..1000.0) {
            prop_assert!(PayoffType::Call.evaluate(spot, strike) >= 0.0);
            prop_assert!(PayoffType::Put.evaluate(spot, strike) >= 0.0);
        }

        #[test]
        fn prop_call_minus_put_is_forward(spot in 0.0f64..1000.0, strike in 0.01f64..1000.0) {
            let diff = PayoffType::Call.evaluate(spot, strike) - PayoffType::Put.evaluate(spot, strike);
            prop_assert!((diff - (spot - strike)).abs() < 1e-9);
        }
    }
}
