//! Convergence command implementation
//!
//! Doubles the time and space resolution of the finite-difference engine
//! and reports how the price settles.

use pricer_pricing::fdm::FdmEngine;
use serde::Serialize;

use super::{ContractArgs, Format, GridArgs};
use crate::{CliError, Result};

/// Arguments of `cev-pricer convergence`.
#[derive(clap::Args, Clone, Debug)]
pub struct ConvergenceArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Number of refinement levels (steps double at each level)
    #[arg(long, default_value_t = 4)]
    pub levels: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

/// One refinement level.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConvergenceRow {
    /// Time steps
    pub time_steps: usize,
    /// Nodes on each side of spot
    pub space_steps: usize,
    /// Finite-difference price
    pub price: f64,
    /// Change from the previous level
    pub change: Option<f64>,
    /// Difference from the closed form
    pub error: f64,
}

/// Run the convergence command
pub fn run(args: &ConvergenceArgs) -> Result<()> {
    let rows = tabulate(args)?;
    match args.format {
        Format::Table => {
            println!(
                "{:>8} {:>8} {:>12} {:>12} {:>12}",
                "N", "Nj", "price", "change", "error"
            );
            for row in &rows {
                let change = row
                    .change
                    .map_or_else(|| "-".to_string(), |c| format!("{:.2e}", c));
                println!(
                    "{:>8} {:>8} {:>12.6} {:>12} {:>12.2e}",
                    row.time_steps, row.space_steps, row.price, change, row.error
                );
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

/// Prices the contract at each refinement level.
pub fn tabulate(args: &ConvergenceArgs) -> Result<Vec<ConvergenceRow>> {
    if args.levels == 0 {
        return Err(CliError::InvalidArgument(
            "--levels must be at least 1".to_string(),
        ));
    }
    let instrument = args.contract.instrument()?;
    let reference = instrument.analytical_npv()?;

    let mut rows: Vec<ConvergenceRow> = Vec::with_capacity(args.levels);
    for level in 0..args.levels {
        let scale = 1usize << level;
        let time_steps = args.grid.time_steps * scale;
        let space_steps = args.grid.space_steps * scale;
        let config =
            args.grid
                .config_with_steps(args.contract.beta, time_steps, space_steps)?;
        let price = FdmEngine::run(&instrument, config)?;
        rows.push(ConvergenceRow {
            time_steps,
            space_steps,
            price,
            change: rows.last().map(|prev| price - prev.price),
            error: price - reference,
        });
    }
    Ok(rows)
}
