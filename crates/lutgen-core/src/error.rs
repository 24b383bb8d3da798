//! Error types for lutgen-core operations.
//!
//! The [`Error`] enum covers the failure modes of the pixel buffer and
//! settings types:
//! - Buffer construction with a length that does not match the dimensions
//! - Unparseable resolution tokens
//! - Pixel data that cannot be acquired at all
//!
//! # Usage
//!
//! ```rust
//! use lutgen_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::from_rgba(2, 2, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! # Used By
//!
//! - `lutgen-lut` - resolution parsing in `.cube` files
//! - `lutgen-io` - missing or undecodable images are reported as
//!   [`Error::ResourceUnavailable`]

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading core lutgen types.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match `width * height * 4`.
    ///
    /// Also returned when the dimensions overflow the addressable size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Resolution token is not one of `17x17x17`, `33x33x33`, `64x64x64`.
    #[error("unsupported LUT resolution: {0}")]
    InvalidResolution(String),

    /// Pixel data could not be acquired from its source.
    ///
    /// Fatal to the requested operation; no partial result is produced.
    #[error("pixel data unavailable: {0}")]
    ResourceUnavailable(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ResourceUnavailable`] error.
    #[inline]
    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(4, 4, "expected 64 bytes, got 3");
        let msg = err.to_string();
        assert!(msg.contains("4x4"));
        assert!(msg.contains("expected 64 bytes"));
    }

    #[test]
    fn test_resource_unavailable() {
        let err = Error::resource_unavailable("no decoder for .bmp");
        assert_eq!(err.to_string(), "pixel data unavailable: no decoder for .bmp");
    }
}
