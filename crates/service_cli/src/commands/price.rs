//! Price command implementation
//!
//! Runs the selected engines on one contract and reports their prices
//! side by side.

use pricer_models::market::MarketInstrument;
use pricer_pricing::fdm::FdmEngine;
use pricer_pricing::mc::{Simulation, SimulationConfig, SimulationResult};
use serde::Serialize;
use tracing::info;

use super::{ContractArgs, Engine, Format, GridArgs};
use crate::Result;

/// Arguments of `cev-pricer price`.
#[derive(clap::Args, Clone, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Engines to run
    #[arg(long, value_enum, default_value_t = Engine::All)]
    pub engine: Engine,

    /// Monte Carlo simulation budget
    #[arg(long, default_value_t = 100_000)]
    pub simulations: usize,

    /// Simulations between convergence checks
    #[arg(long, default_value_t = 10_000)]
    pub snapshot: usize,

    /// Target confidence-interval width
    #[arg(long, default_value_t = 0.05)]
    pub goal: f64,

    /// Confidence level of the interval
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Monte Carlo seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

/// Prices produced by one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Dynamics of the instrument
    pub model: &'static str,
    /// "call" or "put"
    pub payoff: &'static str,
    /// Closed-form price
    pub analytical: Option<f64>,
    /// Finite-difference price
    pub fdm: Option<f64>,
    /// Monte Carlo estimate
    pub monte_carlo: Option<SimulationResult>,
}

/// Run the price command
pub fn run(args: &PriceArgs) -> Result<()> {
    let report = evaluate(args)?;
    match args.format {
        Format::Table => print!("{}", render_table(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Runs the selected engines.
pub fn evaluate(args: &PriceArgs) -> Result<PriceReport> {
    let instrument = args.contract.instrument()?;
    let wants = |engine: Engine| args.engine == engine || args.engine == Engine::All;

    info!(
        model = instrument.model_name(),
        payoff = %instrument.payoff_type(),
        "pricing contract"
    );

    let analytical = if wants(Engine::Analytical) {
        Some(instrument.analytical_npv()?)
    } else {
        None
    };
    let fdm = if wants(Engine::Fdm) {
        let config = args.grid.config(args.contract.beta)?;
        Some(FdmEngine::run(&instrument, config)?)
    } else {
        None
    };
    let monte_carlo = if wants(Engine::Mc) {
        Some(simulate(args, &instrument)?)
    } else {
        None
    };

    Ok(PriceReport {
        model: instrument.model_name(),
        payoff: instrument.payoff_type().name(),
        analytical,
        fdm,
        monte_carlo,
    })
}

fn simulate(args: &PriceArgs, instrument: &MarketInstrument) -> Result<SimulationResult> {
    let config = SimulationConfig::builder()
        .number_simulations(args.simulations)
        .snapshot_interval(args.snapshot)
        .goal(args.goal)
        .confidence_level(args.confidence)
        .seed(args.seed)
        .build()?;
    Ok(Simulation::new(config, instrument).run()?)
}

/// Formats the report as an aligned table.
///
/// Differences are quoted against the closed form when it was computed.
pub fn render_table(report: &PriceReport) -> String {
    let mut out = format!("{} {}\n", report.model, report.payoff);
    out.push_str(&format!("{:<12} {:>12} {:>12}\n", "engine", "price", "diff"));

    let diff = |price: f64| match report.analytical {
        Some(reference) => format!("{:>12.6}", price - reference),
        None => format!("{:>12}", "-"),
    };

    if let Some(price) = report.analytical {
        out.push_str(&format!("{:<12} {:>12.6} {:>12}\n", "analytical", price, "-"));
    }
    if let Some(price) = report.fdm {
        out.push_str(&format!("{:<12} {:>12.6} {}\n", "fdm", price, diff(price)));
    }
    if let Some(mc) = &report.monte_carlo {
        out.push_str(&format!(
            "{:<12} {:>12.6} {}  ±{:.6} ({} sims{})\n",
            "monte carlo",
            mc.mean,
            diff(mc.mean),
            0.5 * mc.ci_width,
            mc.simulations,
            if mc.converged { ", converged" } else { "" }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{contract, grid};
    use approx::assert_relative_eq;

    fn args(engine: Engine) -> PriceArgs {
        PriceArgs {
            contract: contract(),
            grid: grid(100),
            engine,
            simulations: 2_000,
            snapshot: 1_000,
            goal: 0.05,
            confidence: 0.95,
            seed: 42,
            format: Format::Table,
        }
    }

    #[test]
    fn test_single_engine_selection() {
        let report = evaluate(&args(Engine::Fdm)).unwrap();
        assert!(report.analytical.is_none());
        assert!(report.monte_carlo.is_none());
        assert_relative_eq!(report.fdm.unwrap(), 1.6659, epsilon = 2e-3);
    }

    #[test]
    fn test_all_engines() {
        let report = evaluate(&args(Engine::All)).unwrap();
        let analytical = report.analytical.unwrap();
        assert_relative_eq!(analytical, 1.6717, epsilon = 1e-3);
        assert!((report.fdm.unwrap() - analytical).abs() < 1e-2);
        assert_eq!(report.monte_carlo.unwrap().simulations, 2_000);

        let table = render_table(&report);
        assert!(table.starts_with("CEV put"));
        assert!(table.contains("analytical"));
        assert!(table.contains("monte carlo"));
    }

    #[test]
    fn test_json_report() {
        let report = evaluate(&args(Engine::Analytical)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["payoff"], "put");
        assert!(json["fdm"].is_null());
    }

    #[test]
    fn test_invalid_simulation_config() {
        let mut bad = args(Engine::Mc);
        bad.confidence = 1.5;
        assert!(evaluate(&bad).is_err());
    }
}
