//! Adapters Module
//!
//! Contains the `BenchTarget` trait and the registry of signature scheme
//! targets.
//!
//! This module provides:
//! - `BenchTarget` trait with `id()`, `scheme()` and `run()` methods
//! - `all_targets()` registry returning `Vec<Box<dyn BenchTarget>>`
//! - `SignatureBenchmark`, a generic keygen/sign/verify timer
//! - PQClean-backed Dilithium and Falcon schemes

pub mod pqclean;
pub mod signature;

use crate::benchmarks::BenchmarkResult;
use async_trait::async_trait;
use std::error::Error;

pub use pqclean::{Dilithium2, Dilithium3, Dilithium5, Falcon512};
pub use signature::{SchemeError, SignatureBenchmark, SignatureScheme};

/// Timed operations per phase, matching the reference harness.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Benchmark target trait.
///
/// All benchmark adapters implement this trait to be registered in the
/// suite.
///
/// # Example
///
/// ```rust
/// use pqc_benchmarks::adapters::BenchTarget;
/// use pqc_benchmarks::benchmarks::{BenchmarkResult, Timings};
/// use async_trait::async_trait;
///
/// struct Fixed;
///
/// #[async_trait]
/// impl BenchTarget for Fixed {
///     fn id(&self) -> &str {
///         "Fixed"
///     }
///
///     fn scheme(&self) -> &str {
///         "none"
///     }
///
///     async fn run(&self) -> Result<BenchmarkResult, Box<dyn std::error::Error + Send + Sync>> {
///         let timings = Timings { keygen_ms: 1.0, sign_ms: 1.0, verify_ms: 1.0 };
///         Ok(BenchmarkResult::new("Fixed", "none", 1, timings))
///     }
/// }
/// ```
#[async_trait]
pub trait BenchTarget: Send + Sync {
    /// Returns the label of this target.
    ///
    /// The label becomes the `VERSION` column of the results table and the
    /// category name on the chart, so it should be unique and valid as a
    /// filename.
    fn id(&self) -> &str;

    /// Returns the algorithm benchmarked under this label.
    fn scheme(&self) -> &str;

    /// Execute the benchmark and return results.
    ///
    /// # Errors
    ///
    /// Returns an error if the benchmark cannot be completed.
    async fn run(&self) -> Result<BenchmarkResult, Box<dyn Error + Send + Sync>>;

    /// Optional: Get a human-readable description of this benchmark.
    fn description(&self) -> &str {
        "No description provided"
    }
}

/// Registry of all benchmark targets, at the default iteration count.
///
/// # Example
///
/// ```rust
/// use pqc_benchmarks::adapters::all_targets;
///
/// let targets = all_targets();
/// for target in &targets {
///     println!("  - {}: {}", target.id(), target.description());
/// }
/// ```
pub fn all_targets() -> Vec<Box<dyn BenchTarget>> {
    targets_with_iterations(DEFAULT_ITERATIONS)
}

/// Registry of all benchmark targets, timing `iterations` operations per
/// phase.
///
/// The optimized Dilithium II row comes first and is followed by the
/// general implementations it is compared against. Both Dilithium II rows
/// time the same PQClean code.
pub fn targets_with_iterations(iterations: usize) -> Vec<Box<dyn BenchTarget>> {
    vec![
        Box::new(
            SignatureBenchmark::new("Dilithium_II_Optimized", Dilithium2)
                .with_iterations(iterations),
        ),
        Box::new(
            SignatureBenchmark::new("Dilithium_II_General", Dilithium2).with_iterations(iterations),
        ),
        Box::new(SignatureBenchmark::new("Dilithium_III", Dilithium3).with_iterations(iterations)),
        Box::new(SignatureBenchmark::new("Dilithium_V", Dilithium5).with_iterations(iterations)),
        Box::new(SignatureBenchmark::new("Falcon_512", Falcon512).with_iterations(iterations)),
    ]
}
