//! Typed error handling for deadkw.
//!
//! Every failure in the analysis is fatal: there is no per-file recovery,
//! so callers only ever see the first error that stopped the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deadkw operations.
#[derive(Error, Debug)]
pub enum DeadkwError {
    /// I/O error when listing or reading files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DeadkwError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::InvalidArgument { .. } => None,
        }
    }
}

/// Convenience type alias for deadkw results.
pub type DeadkwResult<T> = Result<T, DeadkwError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DeadkwResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DeadkwResult<T> {
        self.map_err(|e| DeadkwError::io(path, e))
    }
}
