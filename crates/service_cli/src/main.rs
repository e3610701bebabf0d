//! valuer - Command Line Valuation of Bonds and European Options
//!
//! This is the operational entry point for the pricer workspace.
//!
//! # Commands
//!
//! - `valuer bond --config <file>` - Present value, durations, convexity and
//!   yield of a cash-flow schedule
//! - `valuer option --config <file>` - Black-Scholes price and Greeks, Monte
//!   Carlo estimates and implied volatility of a European option
//!
//! Results are written to stdout as JSON. Logs go to stderr, filtered by
//! `--log-level` (or `VALUER_LOG`), then `RUST_LOG`, then `info`.
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate only parses requests and drives the
//! engines of `pricer_models` and `pricer_pricing`; the library crates never
//! read files or the environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Fixed-income and European option valuation
#[derive(Parser, Debug)]
#[command(name = "valuer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter (trace, debug, info, warn, error or a full directive)
    #[arg(long, global = true, env = "VALUER_LOG")]
    log_level: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Value a cash-flow schedule under a rate curve
    Bond {
        /// Path to the bond request (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Value a European option
    Option {
        /// Path to the option request (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
}

fn init_tracing(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| CliError::LogLevel(e.to_string()))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;
    debug!(?cli, "Parsed arguments");

    match cli.command {
        Commands::Bond { config } => commands::bond::run(&config, cli.pretty),
        Commands::Option { config } => commands::option::run(&config, cli.pretty),
    }
}
