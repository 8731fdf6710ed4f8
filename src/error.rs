//! Error types for chart rendering.
//!
//! Every failure of a run maps to one variant here: the input table could
//! not be loaded, the chart could not be drawn, the image could not be
//! written, or the configuration is invalid.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the chart renderer.
#[derive(Error, Debug)]
pub enum Error {
    /// The benchmark table could not be read or has the wrong shape
    #[error("Data load error: {message}")]
    DataLoad {
        /// Detailed error message
        message: String,
        /// Source file, if the table came from disk
        path: Option<PathBuf>,
    },

    /// Drawing the chart failed
    #[error("Render error: {message}")]
    Render {
        /// Detailed error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Detailed error message
        message: String,
        /// Configuration key that caused the error
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a data load error.
    pub fn data_load(message: impl Into<String>) -> Self {
        Error::DataLoad {
            message: message.into(),
            path: None,
        }
    }

    /// Create a data load error for a specific input file.
    pub fn data_load_at(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Error::DataLoad {
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Error::Render {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Create a configuration error for a specific key.
    pub fn config_key(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::DataLoad { .. } => "data_load",
            Error::Render { .. } => "render",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::data_load(err.to_string())
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Error::config(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Attach the input path to data load errors.
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| match e {
            Error::DataLoad { message, .. } => Error::DataLoad {
                message,
                path: Some(path.as_ref().to_path_buf()),
            },
            other => other,
        })
    }
}
