//! CEV market instrument.

use super::MarketData;
use crate::analytical::{AnalyticalError, CevAnalytic};
use crate::instruments::{EuropeanOption, InstrumentError};
use crate::models::CevLocalVol;

/// European option under CEV dynamics `dS = (r - q)S dt + σ S^(β/2) dW`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanOption, PayoffType};
/// use pricer_models::market::CevInstrument;
///
/// let call = EuropeanOption::new(PayoffType::Call, 30.0, 1.0).unwrap();
/// let cev = CevInstrument::new(call, 30.0, 0.05, 0.2 * 30.0_f64.sqrt(), 1.0).unwrap();
/// assert!((cev.analytical_npv().unwrap() - 3.1336).abs() < 1e-3);
///
/// // β = 2 is the lognormal limit and is not a CEV instrument
/// assert!(CevInstrument::new(call, 30.0, 0.05, 0.2, 2.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CevInstrument {
    option: EuropeanOption<f64>,
    market: MarketData,
    local_vol: CevLocalVol,
}

impl CevInstrument {
    /// Creates a CEV instrument with zero dividend yield.
    ///
    /// # Arguments
    /// * `option` - The contract
    /// * `spot` - Spot level
    /// * `rate` - Risk-free rate
    /// * `volatility` - Volatility scale σ
    /// * `beta` - Variance elasticity, `0 <= β < 2`
    ///
    /// # Errors
    /// Returns `InstrumentError` if spot, volatility or β is invalid.
    pub fn new(
        option: EuropeanOption<f64>,
        spot: f64,
        rate: f64,
        volatility: f64,
        beta: f64,
    ) -> Result<Self, InstrumentError> {
        let market = MarketData::new(spot, rate, volatility)?;
        let local_vol = CevLocalVol::new(volatility, beta)?;
        Ok(Self {
            option,
            market,
            local_vol,
        })
    }

    /// Sets the continuous dividend yield.
    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.market = self.market.with_dividend(dividend);
        self
    }

    /// The option contract.
    pub fn option(&self) -> &EuropeanOption<f64> {
        &self.option
    }

    /// Market state.
    pub fn market(&self) -> &MarketData {
        &self.market
    }

    /// Local volatility function `σ·x^(β/2)`.
    pub fn local_vol(&self) -> &CevLocalVol {
        &self.local_vol
    }

    /// Variance elasticity β.
    pub fn beta(&self) -> f64 {
        self.local_vol.beta()
    }

    /// Closed-form CEV price.
    pub fn analytical_npv(&self) -> Result<f64, AnalyticalError> {
        let model = CevAnalytic::new(
            self.market.spot(),
            self.market.rate(),
            self.market.volatility(),
            self.beta(),
        )?
        .with_dividend(self.market.dividend());
        model.price(
            self.option.payoff_type(),
            self.option.strike(),
            self.option.expiry(),
        )
    }
}
