//! Monte Carlo valuation engine.
//!
//! An independent cross-check of the finite-difference engine: it shares
//! the instrument interface but never calls into [`crate::fdm`].
//!
//! # Architecture
//!
//! ```text
//! Simulation
//! ├── SimulationConfig  (budget, confidence level, snapshot interval, goal, seed)
//! ├── Process           (exact GBM, Euler GBM or Euler CEV realisations)
//! ├── PricerRng         (seeded normal draws)
//! └── SimulationStats   (count / sum / sum of squares, stopping rule)
//! ```

mod config;
mod error;
mod simulation;
mod stats;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_GOAL,
    DEFAULT_SNAPSHOT_INTERVAL, MAX_SIMULATIONS,
};
pub use error::{ConfigError, McError};
pub use simulation::{Simulation, SimulationResult};
pub use stats::SimulationStats;
