//! Benchmark Result Definition
//!
//! A `BenchmarkResult` carries the mean keygen/sign/verify times of one
//! target, or the error that stopped it.

use chrono::{DateTime, Utc};
use pqc_chart::BenchmarkRecord;
use serde::{Deserialize, Serialize};

/// Mean time per operation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Mean keypair generation time
    pub keygen_ms: f64,
    /// Mean signing time
    pub sign_ms: f64,
    /// Mean verification time
    pub verify_ms: f64,
}

/// Outcome of one benchmark target.
///
/// # Fields
///
/// * `target_id` - Label of the target; becomes the chart category
/// * `scheme` - Algorithm benchmarked under that label
/// * `iterations` - Operations timed per phase
/// * `timings` - Mean timings, `None` if the run failed
/// * `error` - Failure description, if any
/// * `timestamp` - UTC time the result was recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Label of the benchmark target
    pub target_id: String,

    /// Algorithm name
    pub scheme: String,

    /// Operations timed per phase
    pub iterations: usize,

    /// Mean timings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timings: Option<Timings>,

    /// Error message if the run failed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,

    /// UTC timestamp when the benchmark finished
    pub timestamp: DateTime<Utc>,
}

impl BenchmarkResult {
    /// Create a successful result with the current timestamp.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pqc_benchmarks::benchmarks::result::{BenchmarkResult, Timings};
    ///
    /// let result = BenchmarkResult::new(
    ///     "Dilithium_II",
    ///     "Dilithium2",
    ///     100,
    ///     Timings { keygen_ms: 0.041, sign_ms: 0.109, verify_ms: 0.040 },
    /// );
    /// assert!(result.is_success());
    /// ```
    pub fn new(
        target_id: impl Into<String>,
        scheme: impl Into<String>,
        iterations: usize,
        timings: Timings,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            scheme: scheme.into(),
            iterations,
            timings: Some(timings),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Replace the timestamp.
    ///
    /// Useful for testing or when replaying historical benchmark data.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Create a failed benchmark result.
    pub fn failed(
        target_id: impl Into<String>,
        scheme: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            scheme: scheme.into(),
            iterations: 0,
            timings: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    /// Check if the benchmark succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.timings.is_some()
    }

    /// Table row for the chart, if the run succeeded.
    pub fn to_record(&self) -> Option<BenchmarkRecord> {
        if !self.is_success() {
            return None;
        }
        self.timings.map(|t| {
            BenchmarkRecord::new(&self.target_id, t.keygen_ms, t.sign_ms, t.verify_ms)
                .with_scheme(&self.scheme)
        })
    }
}
