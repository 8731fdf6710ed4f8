//! Markdown report generation.

use super::BenchmarkResult;
use std::fmt::Write;

/// Render results as a Markdown summary with one table row per target.
pub fn generate_summary(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    let succeeded = results.iter().filter(|r| r.is_success()).count();

    let _ = writeln!(out, "# PQC Signature Benchmark Summary\n");
    let _ = writeln!(
        out,
        "{} of {} targets completed.\n",
        succeeded,
        results.len()
    );

    let _ = writeln!(
        out,
        "| Target | Scheme | Iterations | KeyGen (ms) | Sign (ms) | Verify (ms) | Status |"
    );
    let _ = writeln!(out, "|---|---|---:|---:|---:|---:|---|");

    for result in results {
        match (&result.timings, &result.error) {
            (Some(t), None) => {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {:.4} | {:.4} | {:.4} | OK |",
                    result.target_id,
                    result.scheme,
                    result.iterations,
                    t.keygen_ms,
                    t.sign_ms,
                    t.verify_ms
                );
            }
            _ => {
                let _ = writeln!(
                    out,
                    "| {} | {} | - | - | - | - | FAIL: {} |",
                    result.target_id,
                    result.scheme,
                    result.error.as_deref().unwrap_or("no timings")
                );
            }
        }
    }

    out
}
