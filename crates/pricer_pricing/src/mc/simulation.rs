//! Confidence-interval driven Monte Carlo valuation.

use pricer_models::market::MarketInstrument;
use pricer_models::models::Process;
use tracing::{debug, trace, warn};

use super::config::SimulationConfig;
use super::error::McError;
use super::stats::SimulationStats;
use crate::rng::PricerRng;

/// Outcome of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Whether the accuracy goal was met before the budget ran out.
    pub converged: bool,
    /// Number of simulations performed.
    pub simulations: usize,
    /// Estimated value (mean discounted payoff).
    pub mean: f64,
    /// Full width of the confidence interval around `mean`.
    pub ci_width: f64,
}

impl SimulationResult {
    /// Lower and upper ends of the confidence interval.
    #[inline]
    pub fn confidence_interval(&self) -> (f64, f64) {
        let half = 0.5 * self.ci_width;
        (self.mean - half, self.mean + half)
    }

    /// Whether `value` lies inside the confidence interval.
    pub fn contains(&self, value: f64) -> bool {
        let (low, high) = self.confidence_interval();
        (low..=high).contains(&value)
    }
}

/// Monte Carlo valuation of one instrument.
///
/// Each simulation draws a realisation of the process from the
/// instrument's spot over its cash-flow times and values it with
/// [`MarketInstrument::npv`]. The run stops at the first snapshot at which
/// the accuracy goal is met, or when the budget is exhausted.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{EuropeanOption, PayoffType};
/// use pricer_models::market::{BlackScholesInstrument, MarketInstrument};
/// use pricer_pricing::mc::{Simulation, SimulationConfig};
///
/// let call = EuropeanOption::new(PayoffType::Call, 100.0, 1.0).unwrap();
/// let instrument: MarketInstrument =
///     BlackScholesInstrument::new(call, 100.0, 0.05, 0.2).unwrap().into();
///
/// let config = SimulationConfig::builder()
///     .number_simulations(20_000)
///     .snapshot_interval(5_000)
///     .goal(1.0)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let result = Simulation::new(config, &instrument).run().unwrap();
/// assert!(result.simulations <= 20_000);
/// assert!(result.mean > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    instrument: MarketInstrument,
    process: Process,
}

impl Simulation {
    /// Pairs a configuration with an instrument, simulating the
    /// instrument's natural process.
    pub fn new(config: SimulationConfig, instrument: &MarketInstrument) -> Self {
        Self {
            config,
            process: instrument.process(),
            instrument: *instrument,
        }
    }

    /// Replaces the simulated process.
    pub fn with_process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    /// The run configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The simulated process.
    #[inline]
    pub fn process(&self) -> &Process {
        &self.process
    }

    /// Runs the simulation.
    ///
    /// Deterministic for a given seed (seed 0 when none is configured).
    ///
    /// # Errors
    ///
    /// - `McError::Config` if the confidence level or goal is invalid
    /// - `McError::Valuation` if the instrument cannot value a realisation
    /// - `McError::NonFinite` if a realisation values to NaN or infinity
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(
            process = self.process.name(),
            budget = self.config.number_simulations()
        )
    )]
    pub fn run(&self) -> Result<SimulationResult, McError> {
        let config = &self.config;
        let mut stats = SimulationStats::new(config.confidence_level(), config.goal())?;
        let mut rng = PricerRng::from_seed(config.seed().unwrap_or(0));
        let cashflow_times = self.instrument.cashflow_times();
        let budget = config.number_simulations();
        let interval = config.snapshot_interval();

        for simulation in 0..budget {
            let value = self.value_path(simulation, &cashflow_times, &mut rng)?;
            stats.record(value);

            let done = simulation + 1;
            if (done % interval == 0 || done == budget) && self.snapshot(&stats) {
                break;
            }
        }

        Ok(self.finish(&stats))
    }

    /// Simulates and values one realisation.
    fn value_path(
        &self,
        simulation: usize,
        cashflow_times: &[f64],
        rng: &mut PricerRng,
    ) -> Result<f64, McError> {
        let path = self
            .process
            .simulate(self.instrument.spot(), cashflow_times, || rng.gen_normal());
        let value = self
            .instrument
            .npv(path.times(), path.values())
            .map_err(|source| McError::Valuation { simulation, source })?;
        if !value.is_finite() {
            return Err(McError::NonFinite { simulation });
        }
        Ok(value)
    }

    /// Logs a snapshot and reports whether the run may stop.
    fn snapshot(&self, stats: &SimulationStats) -> bool {
        trace!(
            simulations = stats.count(),
            mean = stats.mean(),
            ci_width = stats.ci_width(),
            "snapshot"
        );
        stats.accuracy_reached()
    }

    fn finish(&self, stats: &SimulationStats) -> SimulationResult {
        let result = SimulationResult {
            converged: stats.accuracy_reached(),
            simulations: stats.count(),
            mean: stats.mean(),
            ci_width: stats.ci_width(),
        };
        if result.converged {
            debug!(
                simulations = result.simulations,
                mean = result.mean,
                ci_width = result.ci_width,
                "simulation converged"
            );
        } else {
            warn!(
                simulations = result.simulations,
                ci_width = result.ci_width,
                goal = self.config.goal(),
                "simulation budget exhausted before reaching accuracy goal"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::{EuropeanOption, PayoffType};
    use pricer_models::market::BlackScholesInstrument;
    use pricer_models::models::GbmProcess;

    fn call_instrument() -> MarketInstrument {
        let option = EuropeanOption::new(PayoffType::Call, 100.0, 1.0).unwrap();
        BlackScholesInstrument::new(option, 100.0, 0.05, 0.2)
            .unwrap()
            .into()
    }

    fn config(budget: usize, interval: usize, goal: f64) -> SimulationConfig {
        SimulationConfig::builder()
            .number_simulations(budget)
            .snapshot_interval(interval)
            .goal(goal)
            .seed(11)
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_is_reproducible() {
        let instrument = call_instrument();
        let a = Simulation::new(config(2_000, 500, 0.01), &instrument)
            .run()
            .unwrap();
        let b = Simulation::new(config(2_000, 500, 0.01), &instrument)
            .run()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_budget_exhausted_without_convergence() {
        let result = Simulation::new(config(1_000, 100, 1e-6), &call_instrument())
            .run()
            .unwrap();
        assert!(!result.converged);
        assert_eq!(result.simulations, 1_000);
        assert!(result.ci_width > 0.0);
    }

    #[test]
    fn test_stops_at_first_snapshot_meeting_goal() {
        // A wide goal is met as soon as the first snapshot is checked
        let result = Simulation::new(config(50_000, 1_000, 100.0), &call_instrument())
            .run()
            .unwrap();
        assert!(result.converged);
        assert_eq!(result.simulations, 1_000);
    }

    #[test]
    fn test_zero_volatility_process_is_deterministic() {
        let result = Simulation::new(config(200, 50, 1e-12), &call_instrument())
            .with_process(Process::Gbm(GbmProcess::new(0.05, 0.0)))
            .run()
            .unwrap();
        assert!(result.ci_width < 1e-6);
        let expected = (-0.05_f64).exp() * (100.0 * 0.05_f64.exp() - 100.0);
        assert!((result.mean - expected).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_interval_bounds() {
        let result = SimulationResult {
            converged: true,
            simulations: 10,
            mean: 5.0,
            ci_width: 2.0,
        };
        assert_eq!(result.confidence_interval(), (4.0, 6.0));
        assert!(result.contains(4.5));
        assert!(!result.contains(6.5));
    }
}
