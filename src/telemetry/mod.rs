//! Logging setup and stage timing.
//!
//! Library code only emits `tracing` events; binaries call
//! [`init_logging`] once to install a subscriber.

use crate::{Error, Result};

use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. With `json` the
/// output is one JSON object per event.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| Error::config_key(format!("invalid log level '{}': {}", level, e), "log_level"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::config(format!("failed to set logging subscriber: {}", e)))
}

/// Timing span for one stage of a run.
pub struct Span {
    name: String,
    start: Instant,
    attributes: Vec<(String, String)>,
}

impl Span {
    /// Create a new span.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute to the span.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    /// Get the span name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// End the span, log its duration, and return it in milliseconds.
    pub fn end(self) -> f64 {
        let elapsed_ms = self.elapsed_ms();
        let attributes = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(stage = %self.name, elapsed_ms, %attributes, "Stage finished");
        elapsed_ms
    }
}

/// Create a new span for a stage.
pub fn span(name: impl Into<String>) -> Span {
    Span::new(name)
}
