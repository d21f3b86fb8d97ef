//! Running statistics with a confidence-interval stopping rule.

use pricer_models::analytical::norm_inv_cdf;

use super::error::ConfigError;

/// Running count, sum and sum of squares of simulated values.
///
/// Aggregation is order independent, so two accumulators over disjoint
/// samples can be [merged](SimulationStats::merge).
///
/// The reported interval width is `2·Φ⁻¹(c)·sqrt(var/n)` where `c` is the
/// confidence level and `var` the population variance.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationStats;
///
/// let mut stats = SimulationStats::new(0.95, 0.5).unwrap();
/// for v in [1.0, 2.0, 3.0, 4.0] {
///     stats.record(v);
/// }
/// assert_eq!(stats.mean(), 2.5);
/// assert_eq!(stats.variance(), 1.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    count: usize,
    sum: f64,
    sum_sq: f64,
    confidence_level: f64,
    quantile: f64,
    goal: f64,
}

impl SimulationStats {
    /// Creates an empty accumulator.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidConfidenceLevel` unless `0 < confidence_level < 1`
    /// - `ConfigError::InvalidGoal` unless `goal` is positive and finite
    pub fn new(confidence_level: f64, goal: f64) -> Result<Self, ConfigError> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ConfigError::InvalidConfidenceLevel(confidence_level));
        }
        if goal <= 0.0 || !goal.is_finite() {
            return Err(ConfigError::InvalidGoal(goal));
        }
        Ok(Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            confidence_level,
            quantile: norm_inv_cdf(confidence_level),
            goal,
        })
    }

    /// Adds one simulated value.
    #[inline]
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Folds another accumulator's samples into this one.
    pub fn merge(&mut self, other: &SimulationStats) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }

    /// Number of recorded values.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Confidence level of the interval.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Target interval width.
    #[inline]
    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Sample mean; zero when nothing has been recorded.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population variance `E[x²] − mean²`, floored at zero.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_sq / self.count as f64 - mean * mean).max(0.0)
    }

    /// Full width of the confidence interval around the mean.
    pub fn ci_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        2.0 * self.quantile * (self.variance() / self.count as f64).sqrt()
    }

    /// Whether the interval width is positive and below the goal.
    ///
    /// A zero width (no samples, or all samples equal) never counts as
    /// converged.
    pub fn accuracy_reached(&self) -> bool {
        let width = self.ci_width();
        width > 0.0 && width < self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_stats() {
        let stats = SimulationStats::new(0.95, 0.1).unwrap();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.ci_width(), 0.0);
        assert!(!stats.accuracy_reached());
    }

    #[test]
    fn test_ci_width_formula() {
        let mut stats = SimulationStats::new(0.95, 10.0).unwrap();
        for v in [1.0, 2.0, 3.0, 4.0] {
            stats.record(v);
        }
        // Φ⁻¹(0.95) = 1.6448536
        let expected = 2.0 * 1.6448536269514722 * (1.25_f64 / 4.0).sqrt();
        assert_relative_eq!(stats.ci_width(), expected, epsilon = 1e-8);
        assert!(stats.accuracy_reached());
    }

    #[test]
    fn test_constant_samples_never_converge() {
        let mut stats = SimulationStats::new(0.95, 1.0).unwrap();
        for _ in 0..100 {
            stats.record(3.0);
        }
        assert_eq!(stats.ci_width(), 0.0);
        assert!(!stats.accuracy_reached());
    }

    #[test]
    fn test_goal_is_strict_upper_bound() {
        let mut stats = SimulationStats::new(0.95, 1.0).unwrap();
        stats.record(0.0);
        stats.record(2.0);
        // width = 2·1.645·sqrt(1/2) ≈ 2.33
        assert!(!stats.accuracy_reached());
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            SimulationStats::new(1.0, 0.1),
            Err(ConfigError::InvalidConfidenceLevel(1.0))
        );
        assert_eq!(
            SimulationStats::new(0.9, -1.0),
            Err(ConfigError::InvalidGoal(-1.0))
        );
    }

    proptest! {
        #[test]
        fn prop_merge_is_order_independent(
            xs in prop::collection::vec(-100.0f64..100.0, 1..50),
            ys in prop::collection::vec(-100.0f64..100.0, 1..50),
        ) {
            let mut all = SimulationStats::new(0.95, 1.0).unwrap();
            for v in xs.iter().chain(ys.iter()) {
                all.record(*v);
            }

            let mut left = SimulationStats::new(0.95, 1.0).unwrap();
            let mut right = SimulationStats::new(0.95, 1.0).unwrap();
            xs.iter().for_each(|v| left.record(*v));
            ys.iter().for_each(|v| right.record(*v));
            right.merge(&left);

            prop_assert_eq!(right.count(), all.count());
            prop_assert!((right.mean() - all.mean()).abs() < 1e-9);
            prop_assert!((right.variance() - all.variance()).abs() < 1e-6);
        }

        #[test]
        fn prop_variance_non_negative(xs in prop::collection::vec(-1e3f64..1e3, 1..100)) {
            let mut stats = SimulationStats::new(0.99, 1.0).unwrap();
            xs.iter().for_each(|v| stats.record(*v));
            prop_assert!(stats.variance() >= 0.0);
            prop_assert!(stats.ci_width() >= 0.0);
        }
    }
}
