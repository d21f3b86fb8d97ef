//! Monte Carlo estimates checked against closed-form references.
//!
//! Each check allows the full confidence-interval width (roughly 3.3
//! standard errors at 95%), plus a small allowance for Euler bias where
//! the process is time-stepped.

use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{EuropeanOption, PayoffType};
use pricer_models::market::{BlackScholesInstrument, CevInstrument, MarketInstrument};
use pricer_models::models::{GbmProcess, Process};
use pricer_pricing::mc::{McError, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_black_scholes_call_within_interval() {
    init_tracing();
    let option = EuropeanOption::new(PayoffType::Call, 110.0, 0.5).unwrap();
    let instrument: MarketInstrument = BlackScholesInstrument::new(option, 100.0, 0.05, 0.5)
        .unwrap()
        .into();

    let config = SimulationConfig::builder()
        .number_simulations(100_000)
        .snapshot_interval(100_000)
        .confidence_level(0.95)
        .goal(0.5)
        .seed(42)
        .build()
        .unwrap();
    let result = Simulation::new(config, &instrument).run().unwrap();

    let bs = instrument.analytical_npv().unwrap();
    assert!((bs - 11.184118).abs() < 1e-3);
    assert!(result.converged);
    assert_eq!(result.simulations, 100_000);
    assert!(
        (result.mean - bs).abs() < result.ci_width,
        "mean {} width {} bs {}",
        result.mean,
        result.ci_width,
        bs
    );
}

#[test]
fn test_cev_put_stops_on_goal() {
    init_tracing();
    let option = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
    let sigma = 0.2 * 30.0_f64.sqrt();
    let instrument: MarketInstrument = CevInstrument::new(option, 30.0, 0.05, sigma, 1.0)
        .unwrap()
        .into();

    let config = SimulationConfig::builder()
        .number_simulations(100_000)
        .snapshot_interval(10_000)
        .goal(0.05)
        .seed(7)
        .build()
        .unwrap();
    let result = Simulation::new(config, &instrument).run().unwrap();

    assert!(result.converged);
    assert!(result.simulations < 100_000);
    assert_eq!(result.simulations % 10_000, 0);
    assert!(result.ci_width < 0.05);

    let analytical = instrument.analytical_npv().unwrap();
    assert!((result.mean - analytical).abs() < result.ci_width + 1e-2);
}

#[test]
fn test_euler_gbm_put() {
    init_tracing();
    let option = EuropeanOption::new(PayoffType::Put, 30.0, 1.0).unwrap();
    let instrument: MarketInstrument = BlackScholesInstrument::new(option, 30.0, 0.05, 0.2)
        .unwrap()
        .into();

    let config = SimulationConfig::builder()
        .number_simulations(40_000)
        .snapshot_interval(40_000)
        .goal(1.0)
        .seed(3)
        .build()
        .unwrap();
    let result = Simulation::new(config, &instrument)
        .with_process(Process::SimGbm(GbmProcess::new(0.05, 0.2)))
        .run()
        .unwrap();

    let bs = BlackScholes::new(30.0, 0.05, 0.2)
        .unwrap()
        .price_put(30.0, 1.0);
    assert_eq!(result.simulations, 40_000);
    assert!((result.mean - bs).abs() < result.ci_width + 1e-2);
}

#[test]
fn test_invalid_confidence_level_is_rejected() {
    let result = SimulationConfig::builder()
        .number_simulations(10)
        .confidence_level(1.0)
        .build();
    let err = McError::from(result.unwrap_err());
    assert!(err.to_string().contains("confidence level"));
}
