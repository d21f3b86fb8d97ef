//! # Pricer Models (L2: Business Logic)
//!
//! Instruments, dynamics and closed-form prices for the CEV pricing workspace.
//!
//! This crate provides:
//! - Payoff functions and European option contracts ([`instruments`])
//! - The CEV local volatility and simulated price processes ([`models`])
//! - Closed-form Black-Scholes and CEV prices ([`analytical`])
//! - Market instruments binding a contract to its dynamics ([`market`])
//!
//! ## Design Principles
//!
//! - **Enum-based dispatch** for payoffs, processes and market instruments
//! - **Validated construction**: invalid parameters fail in `new`, never later
//! - **Injected randomness**: processes consume normal draws supplied by the caller
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{EuropeanOption, PayoffType};
//! use pricer_models::market::{CevInstrument, MarketInstrument};
//!
//! let put = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
//! let instrument: MarketInstrument = CevInstrument::new(put, 30.0, 0.05, 0.2, 1.9999)
//!     .unwrap()
//!     .into();
//!
//! let price = instrument.analytical_npv().unwrap();
//! assert!((price - 1.6717).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod market;
pub mod models;
