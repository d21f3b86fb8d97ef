//! # Pricer Pricing (L3: Engines)
//!
//! Numerical engines for the CEV pricing workspace:
//! - [`fdm`]: theta-scheme finite-difference rollback on a price grid
//! - [`mc`]: Monte Carlo valuation with a confidence-interval stopping rule
//! - [`rng`]: seeded random number generation for the Monte Carlo engine
//!
//! Both engines consume a
//! [`MarketInstrument`](pricer_models::market::MarketInstrument) and
//! neither calls the other, so each serves as an independent check on
//! the other and on the closed-form prices in `pricer_models::analytical`.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{EuropeanOption, PayoffType};
//! use pricer_models::market::{CevInstrument, MarketInstrument};
//! use pricer_pricing::fdm::{FdmConfig, FdmEngine};
//! use pricer_pricing::mc::{Simulation, SimulationConfig};
//!
//! let put = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
//! let instrument: MarketInstrument =
//!     CevInstrument::new(put, 30.0, 0.05, 0.2, 1.9999).unwrap().into();
//!
//! let config = FdmConfig::builder()
//!     .time_steps(100)
//!     .space_steps(100)
//!     .beta(1.9999)
//!     .build()
//!     .unwrap();
//! let fdm = FdmEngine::run(&instrument, config).unwrap();
//!
//! let mc = Simulation::new(
//!     SimulationConfig::builder()
//!         .number_simulations(10_000)
//!         .seed(1)
//!         .build()
//!         .unwrap(),
//!     &instrument,
//! )
//! .run()
//! .unwrap();
//!
//! assert!((fdm - mc.mean).abs() < 0.2);
//! ```
//!
//! ## Logging
//!
//! Engines log through `tracing`: `debug` on construction and completion,
//! `trace` per rollback step and per Monte Carlo snapshot, `warn` when a
//! simulation exhausts its budget. Install any subscriber to see them.
//!
//! ## Feature Flags
//!
//! - `serde`: serialisation of configurations and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod fdm;
pub mod mc;
pub mod rng;
