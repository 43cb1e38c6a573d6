//! Error types for the desktop entry installer.
//!
//! Only the failures that terminate an install run are represented here.
//! Tolerated failures (permission changes, index refresh) are logged and
//! recorded in the install report instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path must be absolute: {0}")]
    NotAbsolute(PathBuf),

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallError>;

impl From<std::io::Error> for InstallError {
    fn from(err: std::io::Error) -> Self {
        InstallError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl InstallError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        InstallError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an IO error describing the failed action.
    pub fn io_action(action: &str, err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        InstallError::Io {
            message: action.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}
