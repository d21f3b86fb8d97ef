//! Common instrument parameters.
//!
//! This module provides the contract terms shared by every option
//! instrument, with validation at construction.

use num_traits::Float;

use super::error::InstrumentError;

/// Contract parameters for a single-strike option.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentParams;
///
/// let params = InstrumentParams::new(100.0_f64, 1.0).unwrap();
/// assert_eq!(params.strike(), 100.0);
/// assert_eq!(params.expiry(), 1.0);
///
/// assert!(InstrumentParams::new(-100.0_f64, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentParams<T: Float> {
    strike: T,
    expiry: T,
}

impl<T: Float> InstrumentParams<T> {
    /// Creates validated instrument parameters.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive and finite)
    /// * `expiry` - Time to expiry in years (must be positive and finite)
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if strike <= 0 or non-finite
    /// - `InstrumentError::InvalidExpiry` if expiry <= 0 or non-finite
    pub fn new(strike: T, expiry: T) -> Result<Self, InstrumentError> {
        if !strike.is_finite() || strike <= T::zero() {
            return Err(InstrumentError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !expiry.is_finite() || expiry <= T::zero() {
            return Err(InstrumentError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { strike, expiry })
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }
}
