//! Simulated price processes.
//!
//! Three processes drive the Monte Carlo engine:
//! - [`Process::Gbm`]: exact lognormal sampling at the requested times
//! - [`Process::SimGbm`]: Euler discretisation of GBM
//! - [`Process::Cev`]: Euler discretisation of `dX = μX dt + σX^(β/2) dW`
//!
//! Randomness is injected: callers pass a source of standard normal draws,
//! so this crate stays free of RNG dependencies.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{GbmProcess, Process};
//!
//! let process = Process::Gbm(GbmProcess::new(0.05, 0.2));
//! // Zero shocks: the path follows exp((μ - σ²/2)t)
//! let path = process.simulate(100.0, &[1.0], || 0.0);
//! assert_eq!(path.times(), &[1.0]);
//! assert!((path.values()[0] - 100.0 * (0.03_f64).exp()).abs() < 1e-10);
//! ```

/// Time step of the Euler schemes.
pub const EULER_DT: f64 = 0.01;

/// Tolerance used when matching requested times against simulated times.
const TIME_TOLERANCE: f64 = 1e-9;

/// Lognormal process parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmProcess {
    /// Drift μ
    pub drift: f64,
    /// Volatility σ
    pub volatility: f64,
}

impl GbmProcess {
    /// Creates GBM parameters.
    pub fn new(drift: f64, volatility: f64) -> Self {
        Self { drift, volatility }
    }
}

/// CEV process parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CevProcess {
    /// Drift μ
    pub drift: f64,
    /// Volatility scale σ
    pub volatility: f64,
    /// Variance elasticity β; the diffusion term is `σ·X^(β/2)`
    pub beta: f64,
}

impl CevProcess {
    /// Creates CEV parameters.
    pub fn new(drift: f64, volatility: f64, beta: f64) -> Self {
        Self {
            drift,
            volatility,
            beta,
        }
    }
}

/// A simulated realisation: observation times and the level at each.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl SimulatedPath {
    /// Observation times, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Simulated levels, one per observation time.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Level at time `t`, if `t` is one of the observation times.
    pub fn value_at(&self, t: f64) -> Option<f64> {
        self.times
            .iter()
            .position(|&s| (s - t).abs() <= TIME_TOLERANCE)
            .map(|i| self.values[i])
    }
}

/// Simulated process, dispatched by variant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Process {
    /// Exact GBM sampling at the cash-flow times
    Gbm(GbmProcess),
    /// Euler-discretised GBM on a [`EULER_DT`] grid
    SimGbm(GbmProcess),
    /// Euler-discretised CEV on a [`EULER_DT`] grid
    Cev(CevProcess),
}

impl Process {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Process::Gbm(_) => "GBM",
            Process::SimGbm(_) => "SimGBM",
            Process::Cev(_) => "CEV",
        }
    }

    /// Whether the process is sampled exactly rather than time-stepped.
    pub fn is_exact(&self) -> bool {
        matches!(self, Process::Gbm(_))
    }

    /// Observation times for a realisation covering `cashflow_times`.
    ///
    /// The exact process observes the cash-flow times themselves (sorted).
    /// Euler processes step on a uniform grid with spacing at most
    /// [`EULER_DT`] whose last point is the latest cash-flow time.
    pub fn observation_times(&self, cashflow_times: &[f64]) -> Vec<f64> {
        if self.is_exact() {
            let mut times = cashflow_times.to_vec();
            times.sort_by(|a, b| a.total_cmp(b));
            return times;
        }

        let horizon = cashflow_times.iter().copied().fold(0.0_f64, f64::max);
        if horizon <= 0.0 {
            return Vec::new();
        }
        let steps = (horizon / EULER_DT - TIME_TOLERANCE).ceil().max(1.0) as usize;
        let dt = horizon / steps as f64;
        (1..=steps).map(|k| k as f64 * dt).collect()
    }

    /// Advances the level over `dt` given a standard normal draw `z`.
    ///
    /// The exact process uses the lognormal transition; the Euler
    /// processes take one explicit step. CEV levels are absorbed at zero.
    #[inline]
    pub fn step(&self, x: f64, dt: f64, z: f64) -> f64 {
        let dw = dt.sqrt() * z;
        match self {
            Process::Gbm(p) => {
                let sigma = p.volatility;
                x * ((p.drift - 0.5 * sigma * sigma) * dt + sigma * dw).exp()
            }
            Process::SimGbm(p) => x + x * p.drift * dt + x * p.volatility * dw,
            Process::Cev(p) => {
                if x <= 0.0 {
                    return 0.0;
                }
                let next = x + x * p.drift * dt + x.powf(0.5 * p.beta) * p.volatility * dw;
                next.max(0.0)
            }
        }
    }

    /// Simulates one realisation from `x0` covering `cashflow_times`.
    ///
    /// `normal` supplies independent standard normal draws, one per step.
    pub fn simulate<F>(&self, x0: f64, cashflow_times: &[f64], mut normal: F) -> SimulatedPath
    where
        F: FnMut() -> f64,
    {
        let times = self.observation_times(cashflow_times);
        let mut values = Vec::with_capacity(times.len());
        let mut x = x0;
        let mut t = 0.0;
        for &next in &times {
            x = self.step(x, next - t, normal());
            values.push(x);
            t = next;
        }
        SimulatedPath { times, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_gbm_observes_cashflow_times() {
        let process = Process::Gbm(GbmProcess::new(0.05, 0.2));
        let path = process.simulate(100.0, &[1.0, 0.5], || 0.0);
        assert_eq!(path.times(), &[0.5, 1.0]);
        assert_relative_eq!(path.values()[1], 100.0 * (0.03_f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_euler_grid_ends_at_horizon() {
        let process = Process::SimGbm(GbmProcess::new(0.05, 0.2));
        let times = process.observation_times(&[0.5]);
        assert_eq!(times.len(), 50);
        assert_relative_eq!(*times.last().unwrap(), 0.5, epsilon = 1e-12);

        // Non-multiple horizon: spacing shrinks below EULER_DT
        let times = process.observation_times(&[0.555]);
        assert_eq!(times.len(), 56);
        assert!(times[0] <= EULER_DT);
        assert_relative_eq!(*times.last().unwrap(), 0.555, epsilon = 1e-12);
    }

    #[test]
    fn test_euler_gbm_deterministic_growth() {
        let process = Process::SimGbm(GbmProcess::new(0.05, 0.2));
        let path = process.simulate(100.0, &[1.0], || 0.0);
        let expected = 100.0 * (1.0 + 0.05 * EULER_DT).powi(100);
        assert_relative_eq!(path.value_at(1.0).unwrap(), expected, epsilon = 1e-8);
    }

    #[test]
    fn test_cev_step_scales_with_power() {
        let process = Process::Cev(CevProcess::new(0.0, 0.2, 1.0));
        // dX = σ·√X·√dt·z with X = 4, dt = 1, z = 1
        assert_relative_eq!(process.step(4.0, 1.0, 1.0), 4.4, epsilon = 1e-12);
    }

    #[test]
    fn test_cev_absorbs_at_zero() {
        let process = Process::Cev(CevProcess::new(0.05, 2.0, 1.0));
        assert_eq!(process.step(0.01, 0.01, -50.0), 0.0);
        assert_eq!(process.step(0.0, 0.01, 5.0), 0.0);
    }

    #[test]
    fn test_value_at_missing_time() {
        let process = Process::Gbm(GbmProcess::new(0.05, 0.2));
        let path = process.simulate(100.0, &[1.0], || 0.0);
        assert!(path.value_at(0.5).is_none());
        assert_eq!(process.name(), "GBM");
        assert!(process.is_exact());
    }
}
