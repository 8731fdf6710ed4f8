//! Benchmarks module
//!
//! Contains the benchmark infrastructure:
//! - `BenchmarkResult` struct
//! - `run_all_benchmarks()` entrypoint
//! - Markdown report generation
//! - I/O utilities for results

pub mod io;
pub mod markdown;
pub mod result;

pub use result::{BenchmarkResult, Timings};

use crate::adapters::{all_targets, BenchTarget};

/// Run all registered benchmarks and return results.
///
/// Targets run one after another in registry order, which is also the
/// left-to-right order of the resulting chart.
///
/// # Example
///
/// ```rust,no_run
/// use pqc_benchmarks::benchmarks::run_all_benchmarks;
///
/// #[tokio::main]
/// async fn main() {
///     let results = run_all_benchmarks().await;
///     for result in results {
///         println!("{}: {:?}", result.target_id, result.timings);
///     }
/// }
/// ```
pub async fn run_all_benchmarks() -> Vec<BenchmarkResult> {
    run_benchmarks(&all_targets()).await
}

/// Run the given targets in order, keeping failed runs as failed results.
pub async fn run_benchmarks(targets: &[Box<dyn BenchTarget>]) -> Vec<BenchmarkResult> {
    let mut results = Vec::with_capacity(targets.len());

    tracing::info!("Running {} benchmark targets", targets.len());

    for target in targets {
        tracing::info!("Running benchmark: {} ({})", target.id(), target.scheme());

        match target.run().await {
            Ok(result) => {
                tracing::info!("Benchmark {} completed successfully", target.id());
                results.push(result);
            }
            Err(e) => {
                tracing::error!("Benchmark {} failed: {}", target.id(), e);
                results.push(BenchmarkResult::failed(
                    target.id(),
                    target.scheme(),
                    e.to_string(),
                ));
            }
        }
    }

    tracing::info!("Completed {} benchmarks", results.len());
    results
}
