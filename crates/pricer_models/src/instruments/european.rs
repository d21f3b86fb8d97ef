//! European option definition.
//!
//! A European option binds a [`PayoffType`] to validated contract terms.
//! It can only be exercised at expiry, so its exercise time equals its
//! maturity.

use num_traits::Float;

use super::error::InstrumentError;
use super::params::InstrumentParams;
use super::payoff::PayoffType;

/// European option instrument.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanOption, PayoffType};
///
/// let put = EuropeanOption::new(PayoffType::Put, 30.0_f64, 1.0).unwrap();
/// assert_eq!(put.payoff(25.0), 5.0);
/// assert_eq!(put.exercise_time(), put.expiry());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanOption<T: Float> {
    params: InstrumentParams<T>,
    payoff_type: PayoffType,
}

impl<T: Float> EuropeanOption<T> {
    /// Creates a new European option.
    ///
    /// # Arguments
    /// * `payoff_type` - Call or Put
    /// * `strike` - Strike price (positive)
    /// * `expiry` - Maturity in years (positive)
    ///
    /// # Errors
    /// Returns `InstrumentError` if strike or expiry fail validation.
    pub fn new(payoff_type: PayoffType, strike: T, expiry: T) -> Result<Self, InstrumentError> {
        Ok(Self::from_params(
            InstrumentParams::new(strike, expiry)?,
            payoff_type,
        ))
    }

    /// Creates a European option from already validated parameters.
    pub fn from_params(params: InstrumentParams<T>, payoff_type: PayoffType) -> Self {
        Self {
            params,
            payoff_type,
        }
    }

    /// Evaluates the terminal payoff at the given underlying level.
    #[inline]
    pub fn payoff(&self, level: T) -> T {
        self.payoff_type.evaluate(level, self.params.strike())
    }

    /// Returns the payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }

    /// Returns the contract parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams<T> {
        &self.params
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.params.strike()
    }

    /// Returns the maturity in years.
    #[inline]
    pub fn expiry(&self) -> T {
        self.params.expiry()
    }

    /// Returns the exercise time, which for a European option is the maturity.
    #[inline]
    pub fn exercise_time(&self) -> T {
        self.params.expiry()
    }
}
