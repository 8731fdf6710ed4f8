//! Benchmark chart CLI
//!
//! Reads `results.csv` and writes `pqc_comparison.png`, printing one
//! confirmation line. Every flag is optional; config files and
//! `PQC_CHART__*` environment variables can override the defaults too.

use pqc_chart::telemetry::init_logging;
use pqc_chart::{render, Config, Result};

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Render PQC benchmark timings as a grouped bar chart
#[derive(Parser, Debug)]
#[command(name = "pqc-chart")]
#[command(about = "Render post-quantum signature benchmark timings as a grouped bar chart")]
#[command(version)]
struct Args {
    /// Benchmark table to read
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Image file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "PQC_CHART_CONFIG")]
    config: Option<PathBuf>,

    /// Open the saved image in the platform viewer
    #[arg(long)]
    show: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Enable JSON log format
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level, args.json_logs) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(category = e.category(), "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;

    // Apply command line overrides
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if args.show {
        config.show = true;
    }

    config.validate()?;

    info!(
        "pqc-chart v{}: {} -> {}",
        pqc_chart::VERSION,
        config.input.display(),
        config.output.display()
    );

    render::render_file(&config.input, &config.output, &config.chart)?;
    println!("Grouped bar chart saved as {}", config.output.display());

    if config.show {
        if let Err(e) = render::open_in_viewer(&config.output) {
            warn!("Could not open viewer: {}", e);
        }
    }

    Ok(())
}
