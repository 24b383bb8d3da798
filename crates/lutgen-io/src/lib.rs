//! # lutgen-io
//!
//! Image I/O for lutgen: reference images come in, graded previews go out.
//!
//! - **PNG** - lossless, alpha preserved
//! - **JPEG** - lossy, opaque
//!
//! Everything decodes to [`PixelBuffer`](lutgen_core::PixelBuffer) (RGBA8).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lutgen_io::{read, write};
//!
//! let reference = read("reference.jpg")?;
//! write("reference.png", &reference)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Input depths |
//! |--------|------|-------|--------------|
//! | PNG | Yes | Yes (RGBA8) | 1-16 bit, palette, gray, RGB(A) |
//! | JPEG | Yes | Yes (RGB, q=90) | 8 bit gray/RGB/CMYK, 16 bit gray |
//!
//! # Dependencies
//!
//! - `lutgen-core` - pixel buffer
//! - [`png`] - PNG support
//! - `jpeg-decoder` / `jpeg-encoder` - JPEG support

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
pub mod jpeg;
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

use lutgen_core::PixelBuffer;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads an image from a file, auto-detecting the format.
///
/// Magic bytes decide first, the extension second.
///
/// # Errors
///
/// Returns [`lutgen_core::Error::ResourceUnavailable`] (as [`IoError::Core`])
/// if:
/// - The file cannot be opened
/// - The format is not PNG or JPEG
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;

    let image = match format {
        Format::Png => png::read(path),
        Format::Jpeg => jpeg::read(path),
        Format::Unknown => Err(IoError::unavailable(format!(
            "{}: no decoder for .{}",
            path.display(),
            extension(path)
        ))),
    }?;

    debug!(
        path = %path.display(),
        ?format,
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Decodes an in-memory image, detecting the format from its magic bytes.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    match Format::from_bytes(bytes) {
        Format::Png => png::decode(bytes),
        Format::Jpeg => jpeg::decode(bytes),
        Format::Unknown => Err(IoError::unavailable("unrecognized image data")),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// JPEG output uses [`jpeg::DEFAULT_QUALITY`] and drops alpha.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);

    match format {
        Format::Png => png::write(path, image),
        Format::Jpeg => jpeg::write(path, image, jpeg::DEFAULT_QUALITY),
        Format::Unknown => Err(IoError::UnsupportedFormat(extension(path).to_string())),
    }?;

    debug!(path = %path.display(), ?format, "Saved image");
    Ok(())
}

/// Opens a file for decoding; failure means the pixels are unavailable.
pub(crate) fn open(path: &Path) -> IoResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| IoError::unavailable(format!("{}: {e}", path.display())))
}

fn extension(path: &Path) -> &str {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
}
