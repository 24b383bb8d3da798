//! PNG format support.
//!
//! Every PNG color type decodes to RGBA8: palettes and sub-byte depths are
//! expanded, 16-bit samples keep their high byte, gray is replicated into
//! RGB and missing alpha becomes 255. Encoding always writes 8-bit RGBA.
//!
//! # Example
//!
//! ```rust,ignore
//! use lutgen_io::png;
//!
//! let image = png::read("reference.png")?;
//! png::write("copy.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use lutgen_core::PixelBuffer;
use std::fs::File;
use std::io::{BufRead, BufWriter, Cursor, Seek, Write};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    decode_from(crate::open(path.as_ref())?)
}

/// Decodes PNG bytes held in memory.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_from(Cursor::new(bytes))
}

/// Writes an image to a PNG file as 8-bit RGBA.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode_to(BufWriter::new(file), image)
}

/// Encodes an image to PNG bytes as 8-bit RGBA.
pub fn encode(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(&mut out, image)?;
    Ok(out)
}

fn decode_from<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(
        png::Transformations::EXPAND | png::Transformations::STRIP_16,
    );

    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::unavailable(format!("PNG: {e}")))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::unavailable("PNG: cannot determine output buffer size"))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::unavailable(format!("PNG: {e}")))?;

    let (width, height) = (info.width, info.height);
    let data = &buf[..info.buffer_size()];
    trace!(width, height, color = ?info.color_type, "png decode");

    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => data.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            return Ok(PixelBuffer::from_rgb(width, height, data)?);
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            data.iter().flat_map(|&g| [g, g, g, 255]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => data
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::unavailable(format!(
                "PNG: unsupported layout {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(PixelBuffer::from_rgba(width, height, rgba)?)
}

fn encode_to<W: Write>(writer: W, image: &PixelBuffer) -> IoResult<()> {
    if image.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot encode a {}x{} image",
            image.width(),
            image.height()
        )));
    }

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.as_bytes())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(width = image.width(), height = image.height(), "Encoded PNG");
    Ok(())
}
