//! CEV pricer CLI
//!
//! Prices a European option with the finite-difference engine and checks
//! it against the closed-form and Monte Carlo valuations.
//!
//! # Commands
//!
//! - `cev-pricer price` - Price one contract with the selected engines
//! - `cev-pricer convergence` - Tabulate finite-difference prices under grid refinement
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=pricer_pricing=debug`).

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

use commands::{ConvergenceArgs, PriceArgs};

/// CEV option pricer
#[derive(Parser)]
#[command(name = "cev-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one contract and compare engines
    Price(PriceArgs),

    /// Finite-difference prices for successively refined grids
    Convergence(ConvergenceArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price(args) => commands::price::run(&args),
        Commands::Convergence(args) => commands::convergence::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price_command() {
        let cli = Cli::try_parse_from([
            "cev-pricer",
            "price",
            "--payoff",
            "call",
            "--beta",
            "1.0",
            "--engine",
            "fdm",
        ])
        .unwrap();
        match cli.command {
            Commands::Price(args) => {
                assert_eq!(args.contract.beta, 1.0);
                assert_eq!(args.engine, commands::Engine::Fdm);
            }
            Commands::Convergence(_) => panic!("expected price command"),
        }
    }
}
