//! # Random Number Generation
//!
//! Seeded pseudo-random generation for the Monte Carlo engine.
//!
//! All draws go through [`PricerRng`], so a simulation run is fully
//! reproducible from its seed: the same seed, configuration and instrument
//! always produce the same estimate and the same stopping point.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//!
//! let uniform_value = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&uniform_value));
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
