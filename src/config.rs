//! Configuration for the chart renderer.
//!
//! Defaults reproduce the fixed contract: read `results.csv`, write
//! `pqc_comparison.png`. A config file and `PQC_CHART__*` environment
//! variables may override any key; CLI flags are applied on top by the
//! binary.

use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input table.
pub const DEFAULT_INPUT: &str = "results.csv";

/// Default output image.
pub const DEFAULT_OUTPUT: &str = "pqc_comparison.png";

/// Largest bar width that keeps adjacent category groups apart.
pub const MAX_BAR_WIDTH: f64 = 1.0 / 3.0;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "PQC_CHART";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Benchmark table to read
    pub input: PathBuf,
    /// Image file to write
    pub output: PathBuf,
    /// Open the saved image in the platform viewer
    pub show: bool,
    /// Chart appearance
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            show: false,
            chart: ChartConfig::default(),
        }
    }
}

/// Chart appearance and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Width of one bar, as a fraction of a category slot
    pub bar_width: f64,
    /// Chart title
    pub title: String,
    /// X-axis description
    pub x_label: String,
    /// Y-axis description
    pub y_label: String,
    /// Rotate category labels on the x-axis
    pub rotate_labels: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            bar_width: 0.25,
            title: "Performance Comparison: Optimized Dilithium II vs General Schemes".to_string(),
            x_label: "Schemes".to_string(),
            y_label: "Time (ms)".to_string(),
            rotate_labels: true,
        }
    }
}

impl Config {
    /// Load configuration from defaults and the environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration from defaults, an optional file, and the environment.
    ///
    /// The file format is picked from its extension (TOML, YAML or JSON).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Config::default())?);

        if let Some(path) = file {
            if !path.exists() {
                return Err(Error::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(::config::File::from(path));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(Error::config_key("input path is empty", "input"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::config_key("output path is empty", "output"));
        }
        self.chart.validate()
    }
}

impl ChartConfig {
    /// Validate chart geometry.
    pub fn validate(&self) -> Result<()> {
        for (value, key) in [(self.width, "chart.width"), (self.height, "chart.height")] {
            if value == 0 {
                return Err(Error::config_key(
                    format!("image size must be non-zero, got {}x{}", self.width, self.height),
                    key,
                ));
            }
        }
        // Three bars of width w centered at i-w, i, i+w span 3w, which must
        // fit in one unit slot.
        if !(self.bar_width > 0.0 && self.bar_width <= MAX_BAR_WIDTH) {
            return Err(Error::config_key(
                format!("bar width must be in (0, 1/3], got {}", self.bar_width),
                "chart.bar_width",
            ));
        }
        Ok(())
    }
}
