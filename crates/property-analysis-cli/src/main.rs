mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::AnalyzeArgs;
use commands::listings::ListingsArgs;
use commands::portfolio::PortfolioArgs;

/// Rental property investment analysis
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Rental property investment analysis",
    long_about = "A CLI for analysing rental property investments with decimal precision. \
                  Computes mortgage payment, cash flow, cap rate, cash-on-cash return, \
                  gross rent multiplier and appreciation, and aggregates held portfolios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a single rental property
    Analyze(AnalyzeArgs),
    /// Per-property metrics and totals for a held portfolio
    Portfolio(PortfolioArgs),
    /// Load a listings catalog, optionally running each listing through the calculator
    Listings(ListingsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Listings(args) => commands::listings::run_listings(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
