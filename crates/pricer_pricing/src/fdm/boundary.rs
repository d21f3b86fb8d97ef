//! Boundary conditions.
//!
//! After initialisation and after every solve the two edge nodes are
//! linearly extrapolated from their inner neighbours, then every node is
//! clamped into `[min_bc, max_bc]`:
//! - `min_bc = 0`
//! - `max_bc = payoff(max)` if positive, otherwise `payoff(min)`
//!
//! so a call is capped by its value at the top of the domain and a put by
//! its value at the bottom.

use pricer_models::market::MarketInstrument;

use super::grid::PriceGrid;

/// Linear extrapolation plus value clamping.
///
/// # Examples
/// ```
/// use pricer_pricing::fdm::BoundaryConditions;
///
/// let bc = BoundaryConditions::new(0.0, 10.0);
/// let mut values = [0.0, 4.0, 7.0, 9.0, 0.0];
/// bc.apply(&mut values);
/// // ends extrapolated, top end capped at 10
/// assert_eq!(values, [1.0, 4.0, 7.0, 9.0, 10.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConditions {
    min_bc: f64,
    max_bc: f64,
}

impl BoundaryConditions {
    /// Creates boundary conditions with explicit bounds.
    pub fn new(min_bc: f64, max_bc: f64) -> Self {
        Self { min_bc, max_bc }
    }

    /// Derives the bounds from the instrument payoff at the domain edges.
    pub fn for_instrument(instrument: &MarketInstrument, grid: &PriceGrid) -> Self {
        let at_max = instrument.payoff(grid.max());
        let max_bc = if at_max > 0.0 {
            at_max
        } else {
            instrument.payoff(grid.min())
        };
        Self::new(0.0, max_bc)
    }

    /// Lower clamp.
    #[inline]
    pub fn min_bc(&self) -> f64 {
        self.min_bc
    }

    /// Upper clamp.
    #[inline]
    pub fn max_bc(&self) -> f64 {
        self.max_bc
    }

    /// Applies extrapolation and clamping in place.
    ///
    /// Slices shorter than three nodes are only clamped.
    pub fn apply(&self, values: &mut [f64]) {
        let n = values.len();
        if n >= 3 {
            values[0] = 2.0 * values[1] - values[2];
            values[n - 1] = 2.0 * values[n - 2] - values[n - 3];
        }
        for v in values.iter_mut() {
            if *v < self.min_bc {
                *v = self.min_bc;
            } else if *v > self.max_bc {
                *v = self.max_bc;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::{EuropeanOption, PayoffType};
    use pricer_models::market::BlackScholesInstrument;
    use proptest::prelude::*;

    fn instrument(payoff: PayoffType) -> MarketInstrument {
        let option = EuropeanOption::new(payoff, 30.0, 1.0).unwrap();
        BlackScholesInstrument::new(option, 30.0, 0.05, 0.2)
            .unwrap()
            .into()
    }

    #[test]
    fn test_call_cap_from_domain_top() {
        let grid = PriceGrid::new(30.0, 10, 0.0, 60.0).unwrap();
        let bc = BoundaryConditions::for_instrument(&instrument(PayoffType::Call), &grid);
        assert_eq!(bc.min_bc(), 0.0);
        assert_eq!(bc.max_bc(), 30.0);
    }

    #[test]
    fn test_put_cap_from_domain_floor() {
        let grid = PriceGrid::new(30.0, 10, 0.0, 60.0).unwrap();
        let bc = BoundaryConditions::for_instrument(&instrument(PayoffType::Put), &grid);
        assert_eq!(bc.max_bc(), 30.0);

        let grid = PriceGrid::new(30.0, 10, 10.0, 60.0).unwrap();
        let bc = BoundaryConditions::for_instrument(&instrument(PayoffType::Put), &grid);
        assert_eq!(bc.max_bc(), 20.0);
    }

    #[test]
    fn test_negative_extrapolation_is_floored() {
        let bc = BoundaryConditions::new(0.0, 100.0);
        let mut values = [0.0, 1.0, 5.0, 6.0];
        bc.apply(&mut values);
        assert_eq!(values, [0.0, 1.0, 5.0, 9.0]);
    }

    proptest! {
        #[test]
        fn prop_values_within_bounds(
            values in prop::collection::vec(-50.0f64..80.0, 3..40),
            cap in 1.0f64..60.0,
        ) {
            let bc = BoundaryConditions::new(0.0, cap);
            let mut values = values;
            bc.apply(&mut values);
            for v in values {
                prop_assert!((0.0..=cap).contains(&v));
            }
        }
    }
}
