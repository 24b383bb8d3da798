//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Lattice data length does not match the resolution.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Cube edge length is not one of the supported resolutions.
    #[error("unsupported LUT size {0} (expected 17, 33 or 64)")]
    UnsupportedSize(usize),

    /// Parse error when loading LUT files.
    #[error("parse error: {0}")]
    Parse(String),

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] lutgen_core::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
