//! Dalal CLI binary.
//!
//! Provides a command-line interface for the dalal equity analysis engine.

mod cmd;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dalal")]
#[command(about = "Technical and fundamental analysis for NSE equities", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List available indicators
    Indicators {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print sector benchmark tables
    Benchmarks {
        /// Show a single sector
        #[arg(short, long)]
        sector: Option<String>,

        /// Benchmark tables to use instead of the built-in NSE tables
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Compute indicators, signals and levels for a price history
    Technical {
        /// JSON file holding an array of OHLCV bars
        history: PathBuf,

        /// Only use bars up to this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,

        /// Analysis configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Run the full analysis for one equity
    Analyze {
        /// JSON file holding the equity input
        input: PathBuf,

        /// Analysis configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DALAL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Indicators { category, verbose } => {
            cmd::indicators::list_indicators(category.as_deref(), verbose);
        }
        Commands::Benchmarks { sector, file } => {
            cmd::benchmarks::show_benchmarks(sector.as_deref(), file.as_deref())?;
        }
        Commands::Technical {
            history,
            as_of,
            config,
            format,
        } => {
            cmd::technical::run_technical(&history, as_of.as_deref(), config.as_deref(), format)?;
        }
        Commands::Analyze {
            input,
            config,
            format,
        } => {
            cmd::analyze::run_analysis(&input, config.as_deref(), format)?;
        }
    }

    Ok(())
}
