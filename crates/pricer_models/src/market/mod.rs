//! Market-aware instruments.
//!
//! A market instrument binds a [`EuropeanOption`] to the market state and
//! dynamics needed to value it: spot, rates, dividend yield and a
//! volatility model. Every engine reads the same capability set:
//!
//! | Capability | Meaning |
//! |---|---|
//! | `spot`, `strike`, `maturity`, `exercise_time` | contract and market terms |
//! | `payoff(level)` | terminal payoff |
//! | `q_drift`, `q_vol` | risk-neutral drift `r - q` and volatility scale |
//! | `cashflow_times` | times a simulated path must cover |
//! | `npv(times, values)` | discounted payoff of one realisation |
//! | `analytical_npv()` | closed-form price |
//!
//! Dispatch is by enum tag ([`MarketInstrument`]), not trait objects.
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{EuropeanOption, PayoffType};
//! use pricer_models::market::{BlackScholesInstrument, MarketInstrument};
//!
//! let put = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
//! let instrument: MarketInstrument =
//!     BlackScholesInstrument::new(put, 30.0, 0.05, 0.2).unwrap().into();
//!
//! let price = instrument.analytical_npv().unwrap();
//! assert!((price - 1.6721).abs() < 1e-3);
//! ```

mod black_scholes;
mod cev;

pub use black_scholes::BlackScholesInstrument;
pub use cev::CevInstrument;

use crate::analytical::AnalyticalError;
use crate::instruments::{EuropeanOption, InstrumentError, PayoffType};
use crate::models::{CevProcess, GbmProcess, Process};

/// Spot, rate, dividend yield and volatility scale shared by all market instruments.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketData {
    spot: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
}

impl MarketData {
    /// Creates validated market data with zero dividend yield.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidSpot` if spot <= 0 or non-finite
    /// - `InstrumentError::InvalidParameter` if volatility <= 0 or rate is non-finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, InstrumentError> {
        if spot <= 0.0 || !spot.is_finite() {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        if volatility <= 0.0 || !volatility.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("volatility must be positive, got {}", volatility),
            });
        }
        if !rate.is_finite() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("rate must be finite, got {}", rate),
            });
        }
        Ok(Self {
            spot,
            rate,
            dividend: 0.0,
            volatility,
        })
    }

    /// Sets the continuous dividend yield.
    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.dividend = dividend;
        self
    }

    /// Spot level.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Volatility scale.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

/// Market instrument, dispatched by dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketInstrument {
    /// Lognormal dynamics
    BlackScholes(BlackScholesInstrument),
    /// Constant-elasticity-of-variance dynamics
    Cev(CevInstrument),
}

impl From<BlackScholesInstrument> for MarketInstrument {
    fn from(instrument: BlackScholesInstrument) -> Self {
        MarketInstrument::BlackScholes(instrument)
    }
}

impl From<CevInstrument> for MarketInstrument {
    fn from(instrument: CevInstrument) -> Self {
        MarketInstrument::Cev(instrument)
    }
}

impl MarketInstrument {
    fn parts(&self) -> (&EuropeanOption<f64>, &MarketData) {
        match self {
            MarketInstrument::BlackScholes(i) => (i.option(), i.market()),
            MarketInstrument::Cev(i) => (i.option(), i.market()),
        }
    }

    /// Short model name used in logs.
    pub fn model_name(&self) -> &'static str {
        match self {
            MarketInstrument::BlackScholes(_) => "BlackScholes",
            MarketInstrument::Cev(_) => "CEV",
        }
    }

    /// The underlying option contract.
    #[inline]
    pub fn option(&self) -> &EuropeanOption<f64> {
        self.parts().0
    }

    /// Market state.
    #[inline]
    pub fn market(&self) -> &MarketData {
        self.parts().1
    }

    /// Spot level.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.market().spot()
    }

    /// Strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.option().strike()
    }

    /// Maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.option().expiry()
    }

    /// Exercise time in years (the maturity, for a European contract).
    #[inline]
    pub fn exercise_time(&self) -> f64 {
        self.option().exercise_time()
    }

    /// Payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.option().payoff_type()
    }

    /// Terminal payoff at `level`.
    #[inline]
    pub fn payoff(&self, level: f64) -> f64 {
        self.option().payoff(level)
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.market().rate()
    }

    /// Dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.market().dividend()
    }

    /// Risk-neutral drift `r - q`.
    #[inline]
    pub fn q_drift(&self) -> f64 {
        self.rate() - self.dividend()
    }

    /// Volatility scale of the dynamics.
    #[inline]
    pub fn q_vol(&self) -> f64 {
        self.market().volatility()
    }

    /// Times a simulated realisation must cover.
    pub fn cashflow_times(&self) -> Vec<f64> {
        vec![self.exercise_time()]
    }

    /// Discount factor to time `t`.
    #[inline]
    pub fn discount(&self, t: f64) -> f64 {
        (-self.rate() * t).exp()
    }

    /// Discounted payoff of one realisation.
    ///
    /// `times` and `values` are a simulated path; the level at the exercise
    /// time is paid off and discounted at the risk-free rate.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidParameter` if the slices differ in length
    /// - `InstrumentError::MissingExerciseTime` if `times` does not contain
    ///   the exercise time
    pub fn npv(&self, times: &[f64], values: &[f64]) -> Result<f64, InstrumentError> {
        if times.len() != values.len() {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "{} observation times but {} values",
                    times.len(),
                    values.len()
                ),
            });
        }
        let exercise_time = self.exercise_time();
        let level = times
            .iter()
            .position(|&t| (t - exercise_time).abs() <= 1e-9)
            .map(|i| values[i])
            .ok_or(InstrumentError::MissingExerciseTime { exercise_time })?;
        Ok(self.discount(exercise_time) * self.payoff(level))
    }

    /// Natural simulated process for the instrument's dynamics.
    ///
    /// Black-Scholes instruments sample GBM exactly; CEV instruments use
    /// the Euler CEV scheme with the instrument's elasticity.
    pub fn process(&self) -> Process {
        match self {
            MarketInstrument::BlackScholes(_) => {
                Process::Gbm(GbmProcess::new(self.q_drift(), self.q_vol()))
            }
            MarketInstrument::Cev(i) => {
                Process::Cev(CevProcess::new(self.q_drift(), self.q_vol(), i.beta()))
            }
        }
    }

    /// Closed-form price under the instrument's dynamics.
    ///
    /// # Errors
    /// Propagates `AnalyticalError` from the underlying pricer.
    pub fn analytical_npv(&self) -> Result<f64, AnalyticalError> {
        match self {
            MarketInstrument::BlackScholes(i) => i.analytical_npv(),
            MarketInstrument::Cev(i) => i.analytical_npv(),
        }
    }
}
