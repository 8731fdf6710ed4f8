//! # pqc-chart
//!
//! Renders post-quantum signature benchmark timings as a grouped bar chart.
//! A benchmark table with one row per scheme (key generation, signing and
//! verification times in milliseconds) becomes a PNG with three bars per
//! scheme, a legend, and dashed gridlines.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pqc_chart::{BenchmarkTable, ChartConfig, ChartRenderer};
//!
//! fn main() -> pqc_chart::Result<()> {
//!     let table = BenchmarkTable::load("results.csv")?;
//!     ChartRenderer::new(ChartConfig::default()).render(&table, "pqc_comparison.png")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`table`]: load the CSV table, failing with [`Error::DataLoad`] on a
//!   missing column or malformed row
//! - [`chart`]: compute category positions, bar offsets and axis ticks
//! - [`render`]: draw with plotters, encode PNG, write the file

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod chart;
pub mod config;
pub mod error;
pub mod render;
pub mod table;
pub mod telemetry;

// Re-export main types for convenience
pub use chart::{Bar, Category, GroupedBarChart, Series, SeriesBars};
pub use crate::config::{ChartConfig, Config};
pub use error::{Error, Result};
pub use render::{render_file, ChartRenderer};
pub use table::{BenchmarkRecord, BenchmarkTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
