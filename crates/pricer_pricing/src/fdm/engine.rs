//! Theta-scheme rollback engine.
//!
//! [`FdmEngine`] owns one pricing run: grid, coefficient builder, banded
//! system, right-hand-side buffer and solution. It walks the explicit
//! state machine
//!
//! ```text
//! Terminal ──step──▶ Stepping(N-1) ──step──▶ … ──step──▶ Stepping(2) ──step──▶ Done
//!     │                                                                         ▲
//!     └────────────────────────── (N = 1: no solves) ───────────────────────────┘
//! ```
//!
//! performing one banded solve per transition (`N - 1` solves in total).
//! Any numerical failure moves the engine to `Failed`; a failed or
//! unfinished run never reports a price.

use pricer_models::market::MarketInstrument;
use pricer_models::models::CevLocalVol;
use tracing::{debug, trace};

use super::boundary::BoundaryConditions;
use super::coefficients::CoefficientBuilder;
use super::config::FdmConfig;
use super::error::{ConfigError, FdmError};
use super::grid::PriceGrid;
use super::system::TridiagonalSystem;

/// Rollback progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackState {
    /// Solution holds the boundary-adjusted terminal payoff.
    Terminal,
    /// The solve for time index `i` has been applied.
    Stepping(usize),
    /// Time zero reached; the price is available.
    Done,
    /// A numerical failure stopped the run.
    Failed,
}

/// Finite-difference pricing engine for one instrument.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{EuropeanOption, PayoffType};
/// use pricer_models::market::{BlackScholesInstrument, MarketInstrument};
/// use pricer_pricing::fdm::{FdmConfig, FdmEngine};
///
/// let put = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
/// let instrument: MarketInstrument =
///     BlackScholesInstrument::new(put, 30.0, 0.05, 0.2).unwrap().into();
///
/// let config = FdmConfig::builder()
///     .time_steps(100)
///     .space_steps(100)
///     .beta(1.9999)
///     .build()
///     .unwrap();
///
/// let mut engine = FdmEngine::new(&instrument, config).unwrap();
/// engine.rollback().unwrap();
/// let price = engine.price().unwrap();
/// assert!((price - 1.6721).abs() < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct FdmEngine {
    instrument: MarketInstrument,
    config: FdmConfig,
    grid: PriceGrid,
    coefficients: CoefficientBuilder,
    system: TridiagonalSystem,
    boundary: BoundaryConditions,
    rhs: Vec<f64>,
    solution: Vec<f64>,
    state: RollbackState,
}

impl FdmEngine {
    /// Builds the grid, system and terminal solution.
    ///
    /// The base volatility, rate and dividend yield come from the
    /// instrument; the elasticity, resolution, theta and drift convention
    /// from `config`. The domain defaults to `[0, 2·strike]`.
    ///
    /// # Errors
    ///
    /// Returns `FdmError::Config` if the domain does not bracket spot or the
    /// local volatility cannot be built.
    pub fn new(instrument: &MarketInstrument, config: FdmConfig) -> Result<Self, FdmError> {
        config.validate()?;

        let (min, max) = config
            .domain()
            .unwrap_or((0.0, 2.0 * instrument.strike()));
        let grid = PriceGrid::new(instrument.spot(), config.space_steps(), min, max)?;

        let local_vol = CevLocalVol::new(instrument.q_vol(), config.beta())
            .map_err(|err| ConfigError::InvalidModel(err.to_string()))?;
        let dt = instrument.maturity() / config.time_steps() as f64;
        let coefficients = CoefficientBuilder::new(
            config.theta(),
            dt,
            grid.dx(),
            instrument.rate(),
            instrument.q_drift(),
            config.drift(),
            local_vol,
        );

        let mut system = TridiagonalSystem::new(grid.len());
        system.assemble(&grid, &coefficients);

        let boundary = BoundaryConditions::for_instrument(instrument, &grid);
        let mut solution: Vec<f64> = grid
            .levels()
            .iter()
            .map(|&x| instrument.payoff(x))
            .collect();
        boundary.apply(&mut solution);

        debug!(
            model = instrument.model_name(),
            payoff = %instrument.payoff_type(),
            time_steps = config.time_steps(),
            nodes = grid.len(),
            dx = grid.dx(),
            dt,
            theta = config.theta(),
            max_bc = boundary.max_bc(),
            "initialised finite-difference engine"
        );

        Ok(Self {
            instrument: *instrument,
            rhs: vec![0.0; grid.len()],
            config,
            grid,
            coefficients,
            system,
            boundary,
            solution,
            state: RollbackState::Terminal,
        })
    }

    /// Convenience: build, roll back and extract the price.
    ///
    /// # Errors
    ///
    /// Propagates any `FdmError` from construction or rollback.
    pub fn run(instrument: &MarketInstrument, config: FdmConfig) -> Result<f64, FdmError> {
        let mut engine = Self::new(instrument, config)?;
        engine.rollback()?;
        engine.price()
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> RollbackState {
        self.state
    }

    /// The price grid.
    #[inline]
    pub fn grid(&self) -> &PriceGrid {
        &self.grid
    }

    /// The current value surface, one value per grid node.
    #[inline]
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    /// The right-hand-side buffer of the latest step.
    #[inline]
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// The assembled banded system.
    #[inline]
    pub fn system(&self) -> &TridiagonalSystem {
        &self.system
    }

    /// The boundary conditions in force.
    #[inline]
    pub fn boundary(&self) -> &BoundaryConditions {
        &self.boundary
    }

    /// The engine configuration.
    #[inline]
    pub fn config(&self) -> &FdmConfig {
        &self.config
    }

    /// The instrument being priced.
    #[inline]
    pub fn instrument(&self) -> &MarketInstrument {
        &self.instrument
    }

    /// Advances one state.
    ///
    /// Returns the new state; stepping a finished run is a no-op.
    ///
    /// # Errors
    ///
    /// - `FdmError::NonFinite` if the right-hand side overflows
    /// - `FdmError::Numerical` if the banded solve fails
    /// - `FdmError::Aborted` if an earlier step already failed
    pub fn step(&mut self) -> Result<RollbackState, FdmError> {
        let index = match self.state {
            RollbackState::Terminal => self.config.time_steps() - 1,
            RollbackState::Stepping(i) => i - 1,
            RollbackState::Done => return Ok(RollbackState::Done),
            RollbackState::Failed => return Err(FdmError::Aborted),
        };

        if index == 0 {
            self.state = RollbackState::Done;
            return Ok(self.state);
        }

        if let Err(err) = self.advance(index) {
            self.state = RollbackState::Failed;
            return Err(err);
        }

        self.state = if index > 1 {
            RollbackState::Stepping(index)
        } else {
            RollbackState::Done
        };
        trace!(
            step = index,
            spot_value = self.solution[self.grid.spot_index()],
            "rollback step"
        );
        Ok(self.state)
    }

    /// Runs the state machine to `Done`.
    ///
    /// # Errors
    ///
    /// Propagates the first `FdmError` raised by [`FdmEngine::step`].
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(
            model = self.instrument.model_name(),
            time_steps = self.config.time_steps(),
            nodes = self.grid.len()
        )
    )]
    pub fn rollback(&mut self) -> Result<(), FdmError> {
        while self.step()? != RollbackState::Done {}
        debug!(
            price = self.solution[self.grid.spot_index()],
            "rollback complete"
        );
        Ok(())
    }

    /// Value at the spot node.
    ///
    /// # Errors
    ///
    /// - `FdmError::NotRolledBack` before the run reaches `Done`
    /// - `FdmError::Aborted` if the run failed
    /// - `FdmError::NonFinite` if the value is not finite
    pub fn price(&self) -> Result<f64, FdmError> {
        match self.state {
            RollbackState::Done => {
                let value = self.solution[self.grid.spot_index()];
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(FdmError::NonFinite { step: 0 })
                }
            }
            RollbackState::Failed => Err(FdmError::Aborted),
            RollbackState::Terminal | RollbackState::Stepping(_) => Err(FdmError::NotRolledBack),
        }
    }

    /// One backward step at time index `index`.
    fn advance(&mut self, index: usize) -> Result<(), FdmError> {
        let last = self.solution.len() - 1;

        // rhs[last] is never written
        for j in 0..last {
            let k = self.coefficients.rhs(self.grid.level(j));
            let left = if j > 0 {
                k.alpha * self.solution[j - 1]
            } else {
                0.0
            };
            self.rhs[j] = left + k.beta * self.solution[j] + k.gamma * self.solution[j + 1];
        }
        if self.rhs.iter().any(|v| !v.is_finite()) {
            return Err(FdmError::NonFinite { step: index });
        }

        self.system
            .solve(&self.rhs, &mut self.solution)
            .map_err(|source| FdmError::Numerical {
                step: index,
                source,
            })?;
        self.boundary.apply(&mut self.solution);
        self.system.assemble(&self.grid, &self.coefficients);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fdm::config::DriftConvention;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{EuropeanOption, PayoffType};
    use pricer_models::market::BlackScholesInstrument;

    fn instrument(payoff: PayoffType) -> MarketInstrument {
        let option = EuropeanOption::new(payoff, 30.0, 1.0).unwrap();
        BlackScholesInstrument::new(option, 30.0, 0.05, 0.2)
            .unwrap()
            .into()
    }

    fn config(n: usize, nj: usize) -> FdmConfig {
        FdmConfig::builder()
            .time_steps(n)
            .space_steps(nj)
            .theta(0.5)
            .beta(1.9999)
            .build()
            .unwrap()
    }

    #[test]
    fn test_terminal_state_holds_payoff() {
        let call = instrument(PayoffType::Call);
        let engine = FdmEngine::new(&call, config(10, 10)).unwrap();

        assert_eq!(engine.state(), RollbackState::Terminal);
        let levels = engine.grid().levels();
        for j in 1..levels.len() - 1 {
            assert_eq!(engine.solution()[j], call.payoff(levels[j]));
        }
        assert_eq!(engine.solution()[engine.grid().spot_index()], call.payoff(30.0));
    }

    #[test]
    fn test_state_sequence() {
        let mut engine = FdmEngine::new(&instrument(PayoffType::Put), config(4, 10)).unwrap();

        assert_eq!(engine.step().unwrap(), RollbackState::Stepping(3));
        assert_eq!(engine.step().unwrap(), RollbackState::Stepping(2));
        assert_eq!(engine.step().unwrap(), RollbackState::Done);
        // stepping a finished run is a no-op
        assert_eq!(engine.step().unwrap(), RollbackState::Done);
    }

    #[test]
    fn test_single_time_step_performs_no_solve() {
        let put = instrument(PayoffType::Put);
        let mut engine = FdmEngine::new(&put, config(1, 10)).unwrap();
        let terminal = engine.solution().to_vec();

        assert_eq!(engine.step().unwrap(), RollbackState::Done);
        assert_eq!(engine.solution(), terminal.as_slice());
        assert_eq!(engine.price().unwrap(), 0.0);
    }

    #[test]
    fn test_price_requires_rollback() {
        let mut engine = FdmEngine::new(&instrument(PayoffType::Put), config(10, 10)).unwrap();
        assert_eq!(engine.price(), Err(FdmError::NotRolledBack));
        engine.step().unwrap();
        assert_eq!(engine.price(), Err(FdmError::NotRolledBack));
        engine.rollback().unwrap();
        assert!(engine.price().is_ok());
    }

    #[test]
    fn test_last_rhs_entry_is_never_written() {
        let mut engine = FdmEngine::new(&instrument(PayoffType::Call), config(20, 20)).unwrap();
        engine.rollback().unwrap();

        let rhs = engine.rhs();
        assert_eq!(rhs[rhs.len() - 1], 0.0);
        assert!(rhs[rhs.len() - 2] > 0.0);
        // the top node comes from extrapolation and the call cap
        let sol = engine.solution();
        let n = sol.len();
        let extrapolated = 2.0 * sol[n - 2] - sol[n - 3];
        assert_eq!(sol[n - 1], extrapolated.clamp(0.0, engine.boundary().max_bc()));
    }

    #[test]
    fn test_first_rhs_entry_has_no_left_neighbour() {
        let cfg = FdmConfig::builder()
            .time_steps(20)
            .space_steps(20)
            .beta(1.9999)
            .with_domain(10.0, 50.0)
            .build()
            .unwrap();
        let mut engine = FdmEngine::new(&instrument(PayoffType::Call), cfg).unwrap();
        let terminal = engine.solution().to_vec();
        let k = engine.coefficients.rhs(engine.grid().level(0));
        // a nonzero alpha makes any wraparound to the top node visible
        assert!(k.alpha.abs() > 1e-6);
        assert!(terminal[terminal.len() - 1] > 0.0);

        engine.step().unwrap();

        let expected = k.beta * terminal[0] + k.gamma * terminal[1];
        assert_relative_eq!(engine.rhs()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_solution_stays_within_boundary_values() {
        for payoff in [PayoffType::Call, PayoffType::Put] {
            let mut engine = FdmEngine::new(&instrument(payoff), config(50, 50)).unwrap();
            let cap = engine.boundary().max_bc();
            assert_eq!(cap, 30.0);
            while engine.step().unwrap() != RollbackState::Done {
                assert!(engine.solution().iter().all(|&v| (0.0..=cap).contains(&v)));
            }
        }
    }

    #[test]
    fn test_call_value_at_spot_never_decreases_backward_in_time() {
        let mut engine = FdmEngine::new(&instrument(PayoffType::Call), config(300, 300)).unwrap();
        let spot = engine.grid().spot_index();
        let mut previous = engine.solution()[spot];

        loop {
            let state = engine.step().unwrap();
            let current = engine.solution()[spot];
            assert!(
                current >= previous - 1e-10,
                "spot value fell from {previous} to {current} at {state:?}"
            );
            previous = current;
            if state == RollbackState::Done {
                break;
            }
        }
        assert!(engine.price().unwrap() > 0.0);
    }

    #[test]
    fn test_flat_drift_regression() {
        let cfg = FdmConfig::builder()
            .time_steps(100)
            .space_steps(100)
            .beta(1.9999)
            .drift(DriftConvention::Flat)
            .build()
            .unwrap();
        let put = FdmEngine::run(&instrument(PayoffType::Put), cfg.clone()).unwrap();
        let call = FdmEngine::run(&instrument(PayoffType::Call), cfg).unwrap();
        assert_relative_eq!(put, 2.238342, epsilon = 1e-4);
        assert_relative_eq!(call, 2.276273, epsilon = 1e-4);
    }

    #[test]
    fn test_proportional_drift_regression() {
        let put = FdmEngine::run(&instrument(PayoffType::Put), config(100, 100)).unwrap();
        let call = FdmEngine::run(&instrument(PayoffType::Call), config(100, 100)).unwrap();
        assert_relative_eq!(put, 1.665937, epsilon = 1e-4);
        assert_relative_eq!(call, 3.093139, epsilon = 1e-4);
    }

    #[test]
    fn test_domain_must_bracket_spot() {
        let cfg = FdmConfig::builder()
            .beta(1.0)
            .with_domain(40.0, 80.0)
            .build()
            .unwrap();
        let result = FdmEngine::new(&instrument(PayoffType::Put), cfg);
        assert!(matches!(
            result,
            Err(FdmError::Config(ConfigError::InvalidDomain { .. }))
        ));
    }
}
