//! JPEG format support.
//!
//! Decoding handles RGB, grayscale, 16-bit grayscale and CMYK input and
//! always yields opaque RGBA8. Encoding drops alpha and writes baseline
//! RGB at a given quality.
//!
//! JPEG is lossy; prefer PNG when the graded output feeds further work.

use crate::{IoError, IoResult};
use lutgen_core::PixelBuffer;
use std::io::Read;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Quality used by [`crate::write`] for `.jpg` targets.
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    decode_from(crate::open(path.as_ref())?)
}

/// Decodes JPEG bytes held in memory.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_from(bytes)
}

/// Writes an image to a JPEG file. Quality is clamped to `1..=100`.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    let bytes = encode(image, quality)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes an image to JPEG bytes. Quality is clamped to `1..=100`.
pub fn encode(image: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let (width, height) = match (u16::try_from(image.width()), u16::try_from(image.height())) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "JPEG cannot hold a {}x{} image",
                image.width(),
                image.height()
            )));
        }
    };

    let rgb: Vec<u8> = image
        .as_bytes()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(&rgb, width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    debug!(width, height, quality, bytes = buffer.len(), "Encoded JPEG");
    Ok(buffer)
}

fn decode_from<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::unavailable(format!("JPEG: {e}")))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::unavailable("JPEG: missing image info"))?;

    let (width, height) = (u32::from(info.width), u32::from(info.height));
    trace!(width, height, format = ?info.pixel_format, "jpeg decode");

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => {
            // High byte first
            pixels.chunks_exact(2).flat_map(|l16| [l16[0]; 3]).collect()
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect()
        }
    };

    Ok(PixelBuffer::from_rgb(width, height, &rgb)?)
}

/// Approximate CMYK to RGB conversion.
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 1.0 - f32::from(cmyk[3]) / 255.0;
    let channel = |v: u8| ((1.0 - f32::from(v) / 255.0) * k * 255.0) as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}
