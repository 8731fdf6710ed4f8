//! PQC Signature Benchmark Runner CLI
//!
//! Times keypair generation, signing and verification for every registered
//! scheme and writes `results.csv` for `pqc-chart`.
//!
//! Usage:
//!   run_benchmarks [OPTIONS]
//!
//! Options:
//!   -o, --output <DIR>        Base directory for results (default: .)
//!   -f, --filter <PATTERN>    Only run targets whose label contains pattern
//!   -n, --iterations <N>      Timed operations per phase (default: 100)
//!   -v, --verbose             Enable verbose output
//!   --json                    Output results as JSON to stdout
//!   --no-write                Don't write results to files
//!   --list                    List targets without running them

use anyhow::Context;
use clap::Parser;
use pqc_benchmarks::adapters::{targets_with_iterations, DEFAULT_ITERATIONS};
use pqc_benchmarks::benchmarks::{io, run_benchmarks};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// PQC Signature Benchmark Runner
#[derive(Parser, Debug)]
#[command(name = "run_benchmarks")]
#[command(version)]
#[command(about = "Benchmark post-quantum signature schemes and write results.csv")]
struct Args {
    /// Base directory for benchmark results
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Only run benchmarks whose label contains this pattern
    #[arg(short, long)]
    filter: Option<String>,

    /// Timed operations per phase
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output results as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Don't write results to files
    #[arg(long)]
    no_write: bool,

    /// List available benchmarks without running them
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    anyhow::ensure!(args.iterations > 0, "--iterations must be at least 1");

    // Handle --list flag
    if args.list {
        println!("Available benchmark targets:\n");
        for target in targets_with_iterations(args.iterations) {
            println!("  {:<24} {:<12} {}", target.id(), target.scheme(), target.description());
        }
        return Ok(());
    }

    // Get targets, optionally filtering
    let targets: Vec<_> = targets_with_iterations(args.iterations)
        .into_iter()
        .filter(|t| {
            args.filter
                .as_deref()
                .map_or(true, |pattern| t.id().contains(pattern))
        })
        .collect();

    if targets.is_empty() {
        eprintln!("No benchmarks match the filter pattern");
        return Ok(());
    }

    info!(
        "Running {} benchmarks, {} iterations per phase",
        targets.len(),
        args.iterations
    );

    let results = run_benchmarks(&targets).await;

    // Output results
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("\nResults Summary:");
        println!("{:-<88}", "");
        println!(
            "{:<24} {:<12} {:>12} {:>12} {:>12} {:>8}",
            "Target", "Scheme", "KeyGen (ms)", "Sign (ms)", "Verify (ms)", "Status"
        );
        println!("{:-<88}", "");

        for result in &results {
            let cell = |f: fn(&pqc_benchmarks::benchmarks::Timings) -> f64| {
                result
                    .timings
                    .as_ref()
                    .map(|t| format!("{:.4}", f(t)))
                    .unwrap_or_else(|| "N/A".to_string())
            };
            let status = if result.is_success() { "OK" } else { "FAIL" };

            println!(
                "{:<24} {:<12} {:>12} {:>12} {:>12} {:>8}",
                result.target_id,
                result.scheme,
                cell(|t| t.keygen_ms),
                cell(|t| t.sign_ms),
                cell(|t| t.verify_ms),
                status
            );
        }

        println!("{:-<88}\n", "");
    }

    // Write results to files
    if !args.no_write {
        io::write_results(&results, &args.output)
            .with_context(|| format!("writing results to {}", args.output.display()))?;
        info!("  - Table: {}", args.output.join(io::RESULTS_CSV).display());
        info!("  - Summary: {}", args.output.join(io::OUTPUT_DIR).join("summary.md").display());
        info!("  - Raw data: {}", args.output.join(io::RAW_OUTPUT_DIR).display());
    }

    // Exit with error code if any benchmarks failed
    let failed_count = results.iter().filter(|r| !r.is_success()).count();
    if failed_count > 0 {
        eprintln!("\n{} benchmark(s) failed", failed_count);
        std::process::exit(1);
    }

    Ok(())
}
