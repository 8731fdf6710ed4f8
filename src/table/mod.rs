//! Benchmark table loading and writing.
//!
//! The table is a comma-delimited file with a header row. The column names
//! below are the contract shared with the benchmark harness that produces
//! the file; extra columns are ignored.
//!
//! ```text
//! VERSION,SCHEME,KEYGEN(ms),SIGN(ms),VERIFY(ms)
//! Dilithium_II,ML-DSA-44,0.0412,0.1093,0.0398
//! ```

use crate::error::ErrorContext;
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column names of the benchmark table.
pub mod columns {
    /// Category label (scheme/version identifier)
    pub const VERSION: &str = "VERSION";
    /// Algorithm name, optional
    pub const SCHEME: &str = "SCHEME";
    /// Mean keypair generation time in milliseconds
    pub const KEYGEN: &str = "KEYGEN(ms)";
    /// Mean signing time in milliseconds
    pub const SIGN: &str = "SIGN(ms)";
    /// Mean verification time in milliseconds
    pub const VERIFY: &str = "VERIFY(ms)";

    /// Columns that must be present in every table.
    pub const REQUIRED: [&str; 4] = [VERSION, KEYGEN, SIGN, VERIFY];
}

/// One row of the benchmark table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Category label shown on the x-axis
    #[serde(rename = "VERSION")]
    pub scheme_label: String,

    /// Algorithm name behind the label
    #[serde(rename = "SCHEME", default)]
    pub scheme: Option<String>,

    /// Keypair generation time (ms)
    #[serde(rename = "KEYGEN(ms)")]
    pub keygen_ms: f64,

    /// Signing time (ms)
    #[serde(rename = "SIGN(ms)")]
    pub sign_ms: f64,

    /// Verification time (ms)
    #[serde(rename = "VERIFY(ms)")]
    pub verify_ms: f64,
}

impl BenchmarkRecord {
    /// Create a record without an algorithm name.
    pub fn new(scheme_label: impl Into<String>, keygen_ms: f64, sign_ms: f64, verify_ms: f64) -> Self {
        Self {
            scheme_label: scheme_label.into(),
            scheme: None,
            keygen_ms,
            sign_ms,
            verify_ms,
        }
    }

    /// Set the algorithm name.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

/// Ordered benchmark rows, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    records: Vec<BenchmarkRecord>,
}

impl BenchmarkTable {
    /// Create a table from records.
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        Self { records }
    }

    /// Load a table from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::data_load_at(format!("cannot open input: {}", e), path))?;

        let table = Self::from_reader(file).with_path(path)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.len(),
            "Loaded benchmark table"
        );
        Ok(table)
    }

    /// Parse a table from any CSV source.
    ///
    /// Fails if a required column is missing, a row cannot be parsed, or
    /// there are no data rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::data_load(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        for (row_idx, result) in csv_reader.deserialize::<BenchmarkRecord>().enumerate() {
            let record =
                result.map_err(|e| Error::data_load(format!("row {}: {}", row_idx + 1, e)))?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::data_load("table has no data rows"));
        }

        Ok(Self { records })
    }

    /// Write the table as CSV, with four decimals per timing.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record([
                columns::VERSION,
                columns::SCHEME,
                columns::KEYGEN,
                columns::SIGN,
                columns::VERIFY,
            ])
            .map_err(std::io::Error::from)?;

        for record in &self.records {
            csv_writer
                .write_record([
                    record.scheme_label.clone(),
                    record.scheme.clone().unwrap_or_default(),
                    format!("{:.4}", record.keygen_ms),
                    format!("{:.4}", record.sign_ms),
                    format!("{:.4}", record.verify_ms),
                ])
                .map_err(std::io::Error::from)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Rows in table order.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Category labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.scheme_label.as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<BenchmarkRecord> for BenchmarkTable {
    fn from_iter<I: IntoIterator<Item = BenchmarkRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
VERSION,SCHEME,KEYGEN(ms),SIGN(ms),VERIFY(ms)
Dilithium_II_Optimized,Dilithium2,0.0412,0.1093,0.0398
Dilithium_III,Dilithium3,0.0671,0.1688,0.0622
Falcon_512,Falcon-512,7.9120,0.2480,0.0441
";

    #[test]
    fn test_parse_preserves_row_order() {
        let table = BenchmarkTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let labels: Vec<&str> = table.labels().collect();
        assert_eq!(
            labels,
            vec!["Dilithium_II_Optimized", "Dilithium_III", "Falcon_512"]
        );

        let falcon = &table.records()[2];
        assert_eq!(falcon.scheme.as_deref(), Some("Falcon-512"));
        assert_eq!(falcon.keygen_ms, 7.912);
        assert_eq!(falcon.sign_ms, 0.248);
        assert_eq!(falcon.verify_ms, 0.0441);
    }

    #[test]
    fn test_scheme_column_is_optional() {
        let csv = "VERSION,KEYGEN(ms),SIGN(ms),VERIFY(ms)\nDilithium-II,2.1,0.9,1.3\n";
        let table = BenchmarkTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            table.records()[0],
            BenchmarkRecord::new("Dilithium-II", 2.1, 0.9, 1.3)
        );
    }

    #[test]
    fn test_extra_columns_and_whitespace_are_ignored() {
        let csv = "NOTE, VERSION ,KEYGEN(ms),SIGN(ms),VERIFY(ms)\nx, A , 1.0 ,2.0,3.0\n";
        let table = BenchmarkTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.records()[0], BenchmarkRecord::new("A", 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_column_is_data_load_error() {
        let csv = "VERSION,KEYGEN(ms),VERIFY(ms)\nA,1.0,3.0\n";
        match BenchmarkTable::from_reader(csv.as_bytes()) {
            Err(Error::DataLoad { message, .. }) => assert!(message.contains("SIGN(ms)")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value_reports_row() {
        let csv = "VERSION,KEYGEN(ms),SIGN(ms),VERIFY(ms)\nA,1.0,2.0,3.0\nB,fast,5.0,6.0\n";
        match BenchmarkTable::from_reader(csv.as_bytes()) {
            Err(Error::DataLoad { message, .. }) => assert!(message.starts_with("row 2")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_rejected() {
        let csv = "VERSION,KEYGEN(ms),SIGN(ms),VERIFY(ms)\n";
        assert!(matches!(
            BenchmarkTable::from_reader(csv.as_bytes()),
            Err(Error::DataLoad { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_carries_path() {
        match BenchmarkTable::load("/nonexistent/results.csv") {
            Err(Error::DataLoad { path, .. }) => {
                assert_eq!(path.unwrap(), Path::new("/nonexistent/results.csv"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_write_csv_format() {
        let table: BenchmarkTable = vec![
            BenchmarkRecord::new("Dilithium_II", 0.04123, 0.1, 0.03999).with_scheme("ML-DSA-44"),
            BenchmarkRecord::new("Custom", 1.0, 2.0, 3.0),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "VERSION,SCHEME,KEYGEN(ms),SIGN(ms),VERIFY(ms)\n\
             Dilithium_II,ML-DSA-44,0.0412,0.1000,0.0400\n\
             Custom,,1.0000,2.0000,3.0000\n"
        );

        let parsed = BenchmarkTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(parsed.records()[0].scheme.as_deref(), Some("ML-DSA-44"));
    }
}
