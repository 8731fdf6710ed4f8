//! I/O Utilities for Benchmark Results
//!
//! Writes the chart input table (`results.csv`), raw JSON per target and a
//! Markdown summary, and reads raw results back.

use super::BenchmarkResult;
use chrono::{DateTime, Utc};
use pqc_chart::BenchmarkTable;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use uuid::Uuid;

/// Results table read by `pqc-chart`, relative to the base path.
pub const RESULTS_CSV: &str = "results.csv";

/// Default output directory for reports.
pub const OUTPUT_DIR: &str = "benchmarks/output";

/// Default directory for raw JSON results.
pub const RAW_OUTPUT_DIR: &str = "benchmarks/output/raw";

/// One invocation of the suite, as stored in `all_results.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Unique run identifier
    pub run_id: Uuid,
    /// When the run was written
    pub written_at: DateTime<Utc>,
    /// Results in execution order
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkRun {
    /// Wrap results in a new run.
    pub fn new(results: Vec<BenchmarkResult>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            written_at: Utc::now(),
            results,
        }
    }
}

/// Write benchmark results below `base_path`.
///
/// This function:
/// 1. Writes `results.csv` with one row per successful target
/// 2. Writes raw JSON results to `benchmarks/output/raw/`
/// 3. Generates and writes `summary.md` to `benchmarks/output/`
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_results(results: &[BenchmarkResult], base_path: &Path) -> io::Result<()> {
    let output_dir = base_path.join(OUTPUT_DIR);
    let raw_dir = base_path.join(RAW_OUTPUT_DIR);

    ensure_output_dirs(base_path)?;

    let csv_path = base_path.join(RESULTS_CSV);
    let rows = write_csv(results, &csv_path)?;

    // Write raw JSON results
    for result in results {
        let filename = format!("{}.json", sanitize_filename(&result.target_id));
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(raw_dir.join(filename), json)?;
    }

    // Write combined results
    let run = BenchmarkRun::new(results.to_vec());
    let all_json = serde_json::to_string_pretty(&run)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(raw_dir.join("all_results.json"), all_json)?;

    // Generate and write summary.md
    let summary = super::markdown::generate_summary(results);
    fs::write(output_dir.join("summary.md"), summary)?;

    tracing::info!(
        run_id = %run.run_id,
        "Wrote {} results ({} table rows) to {}",
        results.len(),
        rows,
        base_path.display()
    );

    Ok(())
}

/// Write the successful results as the chart input table.
///
/// Failed targets are left out, so every row has all three timings.
/// Returns the number of rows written.
pub fn write_csv(results: &[BenchmarkResult], path: &Path) -> io::Result<usize> {
    let table: BenchmarkTable = results.iter().filter_map(|r| r.to_record()).collect();
    let file = File::create(path)?;
    table.write_csv(file).map_err(|e| match e {
        pqc_chart::Error::Io(io_err) => io_err,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    })?;
    Ok(table.len())
}

/// Read all benchmark results from the raw output directory.
pub fn read_results(base_path: &Path) -> io::Result<Vec<BenchmarkResult>> {
    let all_results_path = base_path.join(RAW_OUTPUT_DIR).join("all_results.json");

    if !all_results_path.exists() {
        return Ok(Vec::new());
    }

    let json = fs::read_to_string(all_results_path)?;
    let run: BenchmarkRun = serde_json::from_str(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(run.results)
}

/// Read a single benchmark result by target ID.
pub fn read_result(base_path: &Path, target_id: &str) -> io::Result<Option<BenchmarkResult>> {
    let filename = format!("{}.json", sanitize_filename(target_id));
    let filepath = base_path.join(RAW_OUTPUT_DIR).join(filename);

    if !filepath.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(filepath)?;
    let result: BenchmarkResult = serde_json::from_str(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(Some(result))
}

/// Sanitize a string for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Ensure output directories exist.
pub fn ensure_output_dirs(base_path: &Path) -> io::Result<()> {
    fs::create_dir_all(base_path.join(OUTPUT_DIR))?;
    fs::create_dir_all(base_path.join(RAW_OUTPUT_DIR))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::Timings;
    use tempfile::TempDir;

    fn timings(base: f64) -> Timings {
        Timings {
            keygen_ms: base,
            sign_ms: base * 2.0,
            verify_ms: base / 2.0,
        }
    }

    #[test]
    fn test_write_and_read_results() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        let results = vec![
            BenchmarkResult::new("Dilithium_II", "Dilithium2", 100, timings(0.04)),
            BenchmarkResult::failed("Falcon_512", "Falcon-512", "verification failed"),
            BenchmarkResult::new("Dilithium_V", "Dilithium5", 100, timings(0.1)),
        ];

        write_results(&results, base_path).unwrap();

        // Verify files exist
        assert!(base_path.join(RESULTS_CSV).exists());
        assert!(base_path.join(OUTPUT_DIR).join("summary.md").exists());
        assert!(base_path.join(RAW_OUTPUT_DIR).join("all_results.json").exists());
        assert!(base_path.join(RAW_OUTPUT_DIR).join("Dilithium_II.json").exists());
        assert!(base_path.join(RAW_OUTPUT_DIR).join("Falcon_512.json").exists());

        // Read back results
        let read_back = read_results(base_path).unwrap();
        assert_eq!(read_back.len(), 3);
        assert!(!read_back[1].is_success());

        // Read single result
        let single = read_result(base_path, "Dilithium_V").unwrap();
        assert_eq!(single.unwrap().scheme, "Dilithium5");
        assert!(read_result(base_path, "Unknown").unwrap().is_none());
    }

    #[test]
    fn test_csv_is_chart_input() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = temp_dir.path().join(RESULTS_CSV);

        let results = vec![
            BenchmarkResult::new("Dilithium_II", "Dilithium2", 100, timings(0.04)),
            BenchmarkResult::failed("Falcon_512", "Falcon-512", "boom"),
            BenchmarkResult::new("Falcon_512", "Falcon-512", 100, timings(9.0)),
        ];

        assert_eq!(write_csv(&results, &csv_path).unwrap(), 2);

        let text = fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("VERSION,SCHEME,KEYGEN(ms),SIGN(ms),VERIFY(ms)\n"));
        assert!(text.contains("Dilithium_II,Dilithium2,0.0400,0.0800,0.0200\n"));

        let table = BenchmarkTable::load(&csv_path).unwrap();
        let labels: Vec<&str> = table.labels().collect();
        assert_eq!(labels, vec!["Dilithium_II", "Falcon_512"]);
    }

    #[test]
    fn test_read_results_without_output() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_results(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Dilithium_II"), "Dilithium_II");
        assert_eq!(sanitize_filename("with spaces"), "with_spaces");
        assert_eq!(sanitize_filename("with/slashes"), "with_slashes");
        assert_eq!(sanitize_filename("Falcon-512"), "Falcon-512");
    }
}
