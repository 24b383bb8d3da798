//! Error types for image I/O.
//!
//! Anything that stops pixel data from being read (missing file, corrupt
//! stream, no decoder, unsupported layout) surfaces as
//! [`lutgen_core::Error::ResourceUnavailable`] wrapped in [`IoError::Core`].

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No encoder for the target file type.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Pixel data unavailable or invalid.
    #[error(transparent)]
    Core(#[from] lutgen_core::Error),
}

impl IoError {
    /// Wraps a read failure as [`lutgen_core::Error::ResourceUnavailable`].
    pub(crate) fn unavailable(msg: impl Into<String>) -> Self {
        Self::Core(lutgen_core::Error::resource_unavailable(msg))
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
