//! Generic signature scheme benchmark.
//!
//! Times three phases the same way for every scheme: `iterations` keypair
//! generations, then `iterations` signatures of a fixed message with the
//! last secret key, then `iterations` verifications of the last signature.
//! Each phase reports its mean in milliseconds.

use super::BenchTarget;
use crate::benchmarks::{BenchmarkResult, Timings};
use async_trait::async_trait;
use std::error::Error;
use std::hint::black_box;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Length of the signed message.
pub const MESSAGE_LEN: usize = 32;

/// Fill byte of the signed message.
pub const MESSAGE_BYTE: u8 = 0xAB;

/// A detached-signature scheme.
pub trait SignatureScheme: Send + Sync {
    /// Public verification key
    type PublicKey;
    /// Secret signing key
    type SecretKey;
    /// Detached signature
    type Signature;

    /// Algorithm name, e.g. `Dilithium2`.
    fn name(&self) -> &'static str;

    /// Short description for listings.
    fn description(&self) -> &'static str;

    /// Generate a fresh keypair.
    fn keypair(&self) -> (Self::PublicKey, Self::SecretKey);

    /// Sign `message`.
    fn sign(&self, message: &[u8], secret_key: &Self::SecretKey) -> Self::Signature;

    /// Check `signature` over `message`.
    fn verify(
        &self,
        signature: &Self::Signature,
        message: &[u8],
        public_key: &Self::PublicKey,
    ) -> bool;
}

/// Errors that stop a scheme benchmark.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// A freshly produced signature did not verify
    #[error("{scheme}: signature verification failed at iteration {iteration}")]
    VerificationFailed {
        /// Algorithm name
        scheme: String,
        /// Zero-based verification iteration
        iteration: usize,
    },

    /// Nothing to time
    #[error("iterations must be at least 1")]
    NoIterations,
}

/// Benchmark target timing keygen, sign and verify of one scheme.
pub struct SignatureBenchmark<S> {
    label: String,
    scheme: S,
    iterations: usize,
}

impl<S: SignatureScheme> SignatureBenchmark<S> {
    /// Create a benchmark at the default iteration count.
    pub fn new(label: impl Into<String>, scheme: S) -> Self {
        Self {
            label: label.into(),
            scheme,
            iterations: super::DEFAULT_ITERATIONS,
        }
    }

    /// Set the number of timed operations per phase.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Operations timed per phase.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the three timed phases.
    pub fn measure(&self) -> Result<Timings, SchemeError> {
        let n = self.iterations;
        if n == 0 {
            return Err(SchemeError::NoIterations);
        }

        let start = Instant::now();
        let mut keys = black_box(self.scheme.keypair());
        for _ in 1..n {
            keys = black_box(self.scheme.keypair());
        }
        let keygen = start.elapsed();
        let (public_key, secret_key) = keys;

        let message = [MESSAGE_BYTE; MESSAGE_LEN];
        let start = Instant::now();
        let mut signature = black_box(self.scheme.sign(&message, &secret_key));
        for _ in 1..n {
            signature = black_box(self.scheme.sign(&message, &secret_key));
        }
        let sign = start.elapsed();

        let start = Instant::now();
        for iteration in 0..n {
            if !black_box(self.scheme.verify(&signature, &message, &public_key)) {
                return Err(SchemeError::VerificationFailed {
                    scheme: self.scheme.name().to_string(),
                    iteration,
                });
            }
        }
        let verify = start.elapsed();

        let timings = Timings {
            keygen_ms: mean_ms(keygen, n),
            sign_ms: mean_ms(sign, n),
            verify_ms: mean_ms(verify, n),
        };
        tracing::debug!(
            scheme = self.scheme.name(),
            keygen_ms = timings.keygen_ms,
            sign_ms = timings.sign_ms,
            verify_ms = timings.verify_ms,
            "Measured scheme"
        );
        Ok(timings)
    }
}

#[async_trait]
impl<S: SignatureScheme + 'static> BenchTarget for SignatureBenchmark<S> {
    fn id(&self) -> &str {
        &self.label
    }

    fn scheme(&self) -> &str {
        self.scheme.name()
    }

    fn description(&self) -> &str {
        self.scheme.description()
    }

    async fn run(&self) -> Result<BenchmarkResult, Box<dyn Error + Send + Sync>> {
        let timings = self.measure()?;
        Ok(BenchmarkResult::new(
            self.id(),
            self.scheme(),
            self.iterations,
            timings,
        ))
    }
}

fn mean_ms(total: Duration, n: usize) -> f64 {
    total.as_secs_f64() * 1000.0 / n as f64
}


#[cfg(test)]
mod tests {
    use super::mock::MockScheme;
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_measure_runs_each_phase_n_times() {
        let bench = SignatureBenchmark::new("Mock_I", MockScheme::default()).with_iterations(7);
        let timings = bench.measure().unwrap();

        assert_eq!(bench.scheme.keypairs.load(Ordering::Relaxed), 7);
        assert_eq!(bench.scheme.signatures.load(Ordering::Relaxed), 7);
        assert_eq!(bench.scheme.verifications.load(Ordering::Relaxed), 7);
        assert!(timings.keygen_ms >= 0.0);
        assert!(timings.sign_ms.is_finite());
        assert!(timings.verify_ms.is_finite());
    }

    #[test]
    fn test_verification_failure_stops_run() {
        let bench = SignatureBenchmark::new("Mock_I", MockScheme::rejecting()).with_iterations(5);
        match bench.measure() {
            Err(SchemeError::VerificationFailed { scheme, iteration }) => {
                assert_eq!(scheme, "Mock");
                assert_eq!(iteration, 0);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(bench.scheme.verifications.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let bench = SignatureBenchmark::new("Mock_I", MockScheme::default()).with_iterations(0);
        assert!(matches!(bench.measure(), Err(SchemeError::NoIterations)));
    }

    #[tokio::test]
    async fn test_run_produces_result() {
        let bench = SignatureBenchmark::new("Mock_I", MockScheme::default()).with_iterations(2);
        let result = bench.run().await.unwrap();

        assert_eq!(result.target_id, "Mock_I");
        assert_eq!(result.scheme, "Mock");
        assert_eq!(result.iterations, 2);
        assert!(result.is_success());
    }
}
