//! Pixel buffer type handed between the I/O layer and the LUT engine.
//!
//! [`PixelBuffer`] is a fixed-format image: 8-bit RGBA, row-major,
//! top-to-bottom, no row padding.
//!
//! # Memory Layout
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The buffer is immutable once built. Operations that transform pixels
//! return a new buffer; the pixel storage sits behind an [`Arc`] so clones
//! are cheap and a buffer can be shared across worker threads.
//!
//! # Usage
//!
//! ```rust
//! use lutgen_core::PixelBuffer;
//!
//! let img = PixelBuffer::filled(4, 2, [200, 100, 50, 255]);
//! assert_eq!(img.pixel(3, 1), Some([200, 100, 50, 255]));
//! assert_eq!(img.pixel(4, 0), None);
//! ```

use crate::{Error, Result};
use rayon::prelude::*;
use std::sync::Arc;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Owned, immutable RGBA8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixel data (Arc for cheap cloning)
    data: Arc<Vec<u8>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer of transparent black pixels.
    ///
    /// Zero width or height yields an empty but valid buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Creates a buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates a buffer from interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lutgen_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(img.pixel(0, 0), Some([1, 2, 3, 4]));
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height, CHANNELS)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates a buffer from interleaved RGB bytes, with alpha set to 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = expected_len(width, height, 3)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} RGB bytes, got {}", expected, data.len()),
            ));
        }
        let rgba = data
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect();
        Ok(Self {
            data: Arc::new(rgba),
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` when the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Interleaved RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Returns a new buffer with `f` applied to every RGBA pixel in parallel.
    ///
    /// `f` receives a 4-byte slice and edits it in place; the source buffer
    /// is left untouched.
    ///
    /// ```rust
    /// use lutgen_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::filled(2, 2, [10, 20, 30, 255]);
    /// let inverted = img.par_map_pixels(|px| {
    ///     for c in &mut px[..3] {
    ///         *c = 255 - *c;
    ///     }
    /// });
    /// assert_eq!(inverted.pixel(0, 1), Some([245, 235, 225, 255]));
    /// assert_eq!(img.pixel(0, 1), Some([10, 20, 30, 255]));
    /// ```
    pub fn par_map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn(&mut [u8]) + Sync + Send,
    {
        let mut data = self.data.as_ref().clone();
        data.par_chunks_mut(CHANNELS).for_each(|px| f(px));
        Self {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn expected_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "image dimensions overflow"))
}
