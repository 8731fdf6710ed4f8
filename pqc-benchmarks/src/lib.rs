//! PQC Signature Benchmarks
//!
//! Timing harness for post-quantum signature schemes. Each target runs a
//! fixed number of keypair generations, signatures and verifications and
//! reports the mean time per operation; the results are written as the
//! `results.csv` table that `pqc-chart` renders.
//!
//! This crate provides:
//! - `BenchmarkResult` with per-operation timings
//! - `BenchTarget` trait for benchmark adapters
//! - `run_all_benchmarks()` entrypoint returning `Vec<BenchmarkResult>`
//! - Adapters for Dilithium and Falcon via PQClean

pub mod adapters;
pub mod benchmarks;

pub use adapters::{all_targets, BenchTarget};
pub use benchmarks::{run_all_benchmarks, BenchmarkResult};
