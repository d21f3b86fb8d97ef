//! Lognormal market instrument.

use super::MarketData;
use crate::analytical::{AnalyticalError, BlackScholes};
use crate::instruments::{EuropeanOption, InstrumentError};

/// European option under Black-Scholes dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholesInstrument {
    option: EuropeanOption<f64>,
    market: MarketData,
}

impl BlackScholesInstrument {
    /// Creates a Black-Scholes instrument with zero dividend yield.
    ///
    /// # Errors
    /// Returns `InstrumentError` if spot or volatility is invalid.
    pub fn new(
        option: EuropeanOption<f64>,
        spot: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            option,
            market: MarketData::new(spot, rate, volatility)?,
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

    /// Closed-form Black-Scholes price.
    pub fn analytical_npv(&self) -> Result<f64, AnalyticalError> {
        let model = BlackScholes::new(
            self.market.spot(),
            self.market.rate(),
            self.market.volatility(),
        )?
        .with_dividend(self.market.dividend());
        Ok(model.price_option(&self.option))
    }
}
