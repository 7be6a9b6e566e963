//! Error types for volcast.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for volcast operations.
#[derive(Error, Debug)]
pub enum VolcastError {
    /// The volume file could not be opened.
    #[error("cannot open '{}': {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The header is incomplete or one of its declarations cannot be read.
    #[error("invalid VTK header: {0}")]
    HeaderFormat(String),

    /// The `SCALARS` declaration names a type that is not supported.
    #[error("unsupported volume data type '{0}'")]
    UnsupportedType(String),

    /// The payload ends before all declared elements were read.
    #[error("truncated payload: expected {expected} elements, found {actual}")]
    PayloadTruncated { expected: usize, actual: usize },

    /// An ASCII payload literal does not parse as the declared type.
    #[error("cannot parse element {index} ('{token}') of the payload")]
    PayloadFormat { index: usize, token: String },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl VolcastError {
    /// Shorthand for a [`VolcastError::HeaderFormat`] error.
    pub fn header(message: impl Into<String>) -> Self {
        Self::HeaderFormat(message.into())
    }
}

/// A specialized Result type for volcast operations.
pub type Result<T> = std::result::Result<T, VolcastError>;
