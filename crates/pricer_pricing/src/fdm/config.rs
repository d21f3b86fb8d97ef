//! Finite-difference engine configuration.
//!
//! This module provides [`FdmConfig`] and its builder. All validation
//! happens in [`FdmConfigBuilder::build`], so an engine never starts grid
//! work with an unusable configuration.

use super::error::ConfigError;

/// Drift term used by the coefficient builder.
///
/// `Flat` uses the risk-free rate itself as the first-order coefficient;
/// `Proportional` uses `(r - q)·x`, the drift of the price process.
///
/// # Examples
/// ```
/// use pricer_pricing::fdm::DriftConvention;
///
/// assert_eq!(DriftConvention::default(), DriftConvention::Proportional);
/// assert_eq!(DriftConvention::Flat.drift(0.05, 0.05, 30.0), 0.05);
/// assert!((DriftConvention::Proportional.drift(0.05, 0.05, 30.0) - 1.5).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriftConvention {
    /// `mu(x) = r`
    Flat,
    /// `mu(x) = (r - q)·x`
    #[default]
    Proportional,
}

impl DriftConvention {
    /// Evaluates the drift term at level `x`.
    ///
    /// # Arguments
    /// * `rate` - Risk-free rate r
    /// * `carry` - Risk-neutral drift r - q
    /// * `x` - Grid level
    #[inline]
    pub fn drift(&self, rate: f64, carry: f64, x: f64) -> f64 {
        match self {
            DriftConvention::Flat => rate,
            DriftConvention::Proportional => carry * x,
        }
    }
}

/// Finite-difference engine configuration.
///
/// Use [`FdmConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::fdm::FdmConfig;
///
/// let config = FdmConfig::builder()
///     .time_steps(300)
///     .space_steps(300)
///     .theta(0.5)
///     .beta(1.9999)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.time_steps(), 300);
/// assert_eq!(config.node_count(), 601);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdmConfig {
    /// Number of time steps N.
    time_steps: usize,
    /// Number of space steps on each side of spot, Nj.
    space_steps: usize,
    /// Theta weight: 0 implicit, 1 explicit, 0.5 Crank-Nicolson.
    theta: f64,
    /// CEV elasticity β.
    beta: f64,
    /// Drift term convention.
    drift: DriftConvention,
    /// Explicit price domain; `[0, 2K]` when unset.
    domain: Option<(f64, f64)>,
}

impl FdmConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> FdmConfigBuilder {
        FdmConfigBuilder::default()
    }

    /// Returns the number of time steps N.
    #[inline]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Returns the number of space steps on each side of spot, Nj.
    #[inline]
    pub fn space_steps(&self) -> usize {
        self.space_steps
    }

    /// Returns the number of grid nodes, `2·Nj + 1`.
    #[inline]
    pub fn node_count(&self) -> usize {
        2 * self.space_steps + 1
    }

    /// Returns theta.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Returns the CEV elasticity β.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the drift convention.
    #[inline]
    pub fn drift(&self) -> DriftConvention {
        self.drift
    }

    /// Returns the explicit price domain, if one was set.
    #[inline]
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `time_steps` or `space_steps` is 0
    /// - `theta` is outside `[0, 1]`
    /// - `beta` is outside `[0, 2)`
    /// - an explicit domain is not finite with `0 <= min < max`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_steps == 0 {
            return Err(ConfigError::InvalidTimeSteps(self.time_steps));
        }
        if self.space_steps == 0 {
            return Err(ConfigError::InvalidSpaceSteps(self.space_steps));
        }
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(ConfigError::InvalidTheta(self.theta));
        }
        if !(0.0..2.0).contains(&self.beta) {
            return Err(ConfigError::InvalidBeta(self.beta));
        }
        if let Some((min, max)) = self.domain {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || min >= max {
                return Err(ConfigError::InvalidDomain {
                    min,
                    max,
                    spot: f64::NAN,
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`FdmConfig`].
///
/// Defaults: N = Nj = 100, Crank-Nicolson (θ = 0.5), proportional drift,
/// domain `[0, 2K]`. The elasticity has no default and must be set.
#[derive(Clone, Debug)]
pub struct FdmConfigBuilder {
    time_steps: usize,
    space_steps: usize,
    theta: f64,
    beta: Option<f64>,
    drift: DriftConvention,
    domain: Option<(f64, f64)>,
}

impl Default for FdmConfigBuilder {
    fn default() -> Self {
        Self {
            time_steps: 100,
            space_steps: 100,
            theta: 0.5,
            beta: None,
            drift: DriftConvention::default(),
            domain: None,
        }
    }
}

impl FdmConfigBuilder {
    /// Sets the number of time steps N.
    #[inline]
    pub fn time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = time_steps;
        self
    }

    /// Sets the number of space steps on each side of spot, Nj.
    #[inline]
    pub fn space_steps(mut self, space_steps: usize) -> Self {
        self.space_steps = space_steps;
        self
    }

    /// Sets theta in `[0, 1]`.
    #[inline]
    pub fn theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    /// Sets the CEV elasticity β in `[0, 2)`.
    #[inline]
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Sets the drift convention.
    #[inline]
    pub fn drift(mut self, drift: DriftConvention) -> Self {
        self.drift = drift;
        self
    }

    /// Sets an explicit price domain `[min, max]`.
    #[inline]
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if β was not set or any field is invalid.
    pub fn build(self) -> Result<FdmConfig, ConfigError> {
        let beta = self
            .beta
            .ok_or_else(|| ConfigError::InvalidModel("CEV elasticity must be specified".to_string()))?;

        let config = FdmConfig {
            time_steps: self.time_steps,
            space_steps: self.space_steps,
            theta: self.theta,
            beta,
            drift: self.drift,
            domain: self.domain,
        };

        config.validate()?;
        Ok(config)
    }
}
