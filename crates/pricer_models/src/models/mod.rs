//! Volatility and price-process models.
//!
//! This module provides:
//! - [`CevLocalVol`]: The CEV local volatility function used by the PDE engine
//! - [`Process`]: Static-dispatch enum over the simulated processes
//!   (exact GBM, Euler GBM, Euler CEV) used by the Monte Carlo engine

pub mod local_vol;
pub mod process;

pub use local_vol::CevLocalVol;
pub use process::{CevProcess, GbmProcess, Process, SimulatedPath, EULER_DT};
