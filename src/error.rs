use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseBumpError {
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Version {0} cannot be bumped: component overflow")]
    VersionOverflow(String),

    #[error("No {field} found in {}", path.display())]
    MissingManifestField { path: PathBuf, field: String },

    #[error("Manifest error in {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseBumpError>;

impl ReleaseBumpError {
    /// Create an invalid version error carrying the offending input
    pub fn invalid_version(input: impl Into<String>) -> Self {
        ReleaseBumpError::InvalidVersionFormat(input.into())
    }

    /// Create a missing manifest field error
    pub fn missing_field(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        ReleaseBumpError::MissingManifestField {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Create a manifest error with context
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReleaseBumpError::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Config(msg.into())
    }

    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Usage(msg.into())
    }
}
