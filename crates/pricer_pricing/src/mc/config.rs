//! Monte Carlo simulation configuration.

use super::error::ConfigError;

/// Maximum number of simulations allowed.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Default confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default number of simulations between convergence checks.
pub const DEFAULT_SNAPSHOT_INTERVAL: usize = 1_000;

/// Default target confidence-interval width.
pub const DEFAULT_GOAL: f64 = 0.05;

/// Monte Carlo simulation configuration.
///
/// Immutable once built; use [`SimulationConfigBuilder`].
///
/// A run stops at the first snapshot (every `snapshot_interval`
/// simulations, and at the end of the budget) at which the
/// confidence-interval width is positive and below `goal`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .number_simulations(100_000)
///     .confidence_level(0.95)
///     .snapshot_interval(10_000)
///     .goal(0.5)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.number_simulations(), 100_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    number_simulations: usize,
    confidence_level: f64,
    snapshot_interval: usize,
    goal: f64,
    seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Simulation budget.
    #[inline]
    pub fn number_simulations(&self) -> usize {
        self.number_simulations
    }

    /// Confidence level of the reported interval.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Simulations between convergence checks.
    #[inline]
    pub fn snapshot_interval(&self) -> usize {
        self.snapshot_interval
    }

    /// Target interval width.
    #[inline]
    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `number_simulations` is 0 or greater than 10,000,000
    /// - `confidence_level` is not inside `(0, 1)`
    /// - `snapshot_interval` is 0
    /// - `goal` is not a positive finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_simulations == 0 || self.number_simulations > MAX_SIMULATIONS {
            return Err(ConfigError::InvalidSimulationCount(self.number_simulations));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::InvalidConfidenceLevel(self.confidence_level));
        }
        if self.snapshot_interval == 0 {
            return Err(ConfigError::InvalidSnapshotInterval(self.snapshot_interval));
        }
        if self.goal <= 0.0 || !self.goal.is_finite() {
            return Err(ConfigError::InvalidGoal(self.goal));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    number_simulations: Option<usize>,
    confidence_level: f64,
    snapshot_interval: usize,
    goal: f64,
    seed: Option<u64>,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            number_simulations: None,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            goal: DEFAULT_GOAL,
            seed: None,
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the simulation budget (required).
    #[inline]
    pub fn number_simulations(mut self, number_simulations: usize) -> Self {
        self.number_simulations = Some(number_simulations);
        self
    }

    /// Sets the confidence level, strictly inside `(0, 1)`.
    #[inline]
    pub fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Sets the number of simulations between convergence checks.
    #[inline]
    pub fn snapshot_interval(mut self, snapshot_interval: usize) -> Self {
        self.snapshot_interval = snapshot_interval;
        self
    }

    /// Sets the target confidence-interval width.
    #[inline]
    pub fn goal(mut self, goal: f64) -> Self {
        self.goal = goal;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `number_simulations` is not set or any
    /// value fails [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let number_simulations =
            self.number_simulations
                .ok_or(ConfigError::InvalidParameter {
                    name: "number_simulations",
                    value: "must be specified".to_string(),
                })?;

        let config = SimulationConfig {
            number_simulations,
            confidence_level: self.confidence_level,
            snapshot_interval: self.snapshot_interval,
            goal: self.goal,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = SimulationConfig::builder()
            .number_simulations(10_000)
            .build()
            .unwrap();

        assert_eq!(config.number_simulations(), 10_000);
        assert_eq!(config.confidence_level(), 0.95);
        assert_eq!(config.snapshot_interval(), 1_000);
        assert_eq!(config.goal(), 0.05);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_config_missing_simulations() {
        let result = SimulationConfig::builder().build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "number_simulations",
                ..
            })
        ));
    }

    #[test]
    fn test_config_invalid_simulation_count() {
        let result = SimulationConfig::builder().number_simulations(0).build();
        assert_eq!(result, Err(ConfigError::InvalidSimulationCount(0)));

        let result = SimulationConfig::builder()
            .number_simulations(MAX_SIMULATIONS + 1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidSimulationCount(_))));
    }

    #[test]
    fn test_config_confidence_level_is_open_interval() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let result = SimulationConfig::builder()
                .number_simulations(100)
                .confidence_level(level)
                .build();
            assert!(
                matches!(result, Err(ConfigError::InvalidConfidenceLevel(_))),
                "level {level} accepted"
            );
        }
    }

    #[test]
    fn test_config_invalid_snapshot_and_goal() {
        let result = SimulationConfig::builder()
            .number_simulations(100)
            .snapshot_interval(0)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidSnapshotInterval(0)));

        let result = SimulationConfig::builder()
            .number_simulations(100)
            .goal(0.0)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidGoal(0.0)));
    }
}
