//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a simple text-based LUT format widely supported
//! by DaVinci Resolve, Adobe applications, and many other tools.
//!
//! # Format
//!
//! Export writes exactly this layout:
//!
//! ```text
//! # Created with lutgen
//! # LUT size 17x17x17
//! LUT_3D_SIZE 17
//!
//! 0.000000 0.000000 0.000000
//! ...
//! 1.000000 1.000000 1.000000
//! ```
//!
//! Data lines run red fastest, then green, then blue, which is also the
//! [`Lattice`] storage order. Parsing additionally accepts `TITLE` lines and
//! unit `DOMAIN_MIN` / `DOMAIN_MAX` declarations written by other tools.
//!
//! # Example
//!
//! ```rust
//! use lutgen_core::Resolution;
//! use lutgen_lut::{cube, Lattice};
//!
//! let lut = Lattice::identity(Resolution::R17);
//! let text = cube::export(&lut);
//! assert!(text.starts_with("# Created with lutgen\n"));
//! assert_eq!(cube::parse(text.as_bytes()).unwrap(), lut);
//! ```

use crate::{Lattice, LutError, LutResult};
use lutgen_core::Resolution;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Comment line identifying the generator.
pub const TOOL_COMMENT: &str = "# Created with lutgen";

/// MIME type used when offering an exported LUT for download.
pub const MIME_TYPE: &str = "text/plain";

/// File name prefix used when none is given.
pub const DEFAULT_PREFIX: &str = "myLUT";

/// Renders a lattice as `.cube` text.
///
/// Deterministic and locale-independent: the same lattice always yields
/// byte-identical text.
pub fn export(lattice: &Lattice) -> String {
    CubeText(lattice).to_string()
}

/// Writes a lattice as `.cube` text to `writer`.
pub fn write<W: Write>(mut writer: W, lattice: &Lattice) -> LutResult<()> {
    write!(writer, "{}", CubeText(lattice))?;
    writer.flush()?;
    Ok(())
}

/// Writes a lattice to a .cube file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = Lattice::identity(Resolution::R33);
/// cube::write_file("identity.cube", &lut)?;
/// ```
pub fn write_file<P: AsRef<Path>>(path: P, lattice: &Lattice) -> LutResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write(BufWriter::new(file), lattice)?;
    debug!(path = %path.display(), resolution = %lattice.resolution(), "Wrote .cube");
    Ok(())
}

/// Download file name, `<prefix>_<resolution-token>.cube`.
///
/// ```rust
/// use lutgen_core::Resolution;
/// use lutgen_lut::cube;
///
/// assert_eq!(cube::file_name("myLUT", Resolution::R33), "myLUT_33x33x33.cube");
/// ```
pub fn file_name(prefix: &str, resolution: Resolution) -> String {
    format!("{}_{}.cube", prefix, resolution.token())
}

/// Reads a 3D LUT from a .cube file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = cube::read_file("grade.cube")?;
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> LutResult<Lattice> {
    let file = File::open(path.as_ref())?;
    parse(BufReader::new(file))
}

/// Parses a 3D LUT from a reader.
///
/// Values are clamped to `[0, 1]` and quantized to 8 bits, so parsing an
/// exported lattice gives it back unchanged.
///
/// # Errors
///
/// - [`LutError::Parse`] for malformed lines, 1D LUTs, non-unit domains or a
///   missing `LUT_3D_SIZE`
/// - [`LutError::UnsupportedSize`] for edges other than 17, 33, 64
/// - [`LutError::InvalidSize`] when the entry count is not `N^3`
pub fn parse<R: BufRead>(reader: R) -> LutResult<Lattice> {
    let mut size: Option<usize> = None;
    let mut data: Vec<u8> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse keywords
        if line.starts_with("TITLE") {
            continue;
        } else if line.starts_with("LUT_3D_SIZE") {
            size = Some(parse_size(line)?);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(LutError::Parse("expected 3D LUT, found 1D".into()));
        } else if line.starts_with("DOMAIN_MIN") {
            expect_domain(line, 0.0)?;
        } else if line.starts_with("DOMAIN_MAX") {
            expect_domain(line, 1.0)?;
        } else {
            // Data line
            data.extend_from_slice(&parse_rgb(line)?.map(quantize));
        }
    }

    let size = size.ok_or_else(|| LutError::Parse("missing LUT_3D_SIZE".into()))?;
    let resolution = Resolution::from_edge(size).map_err(|_| LutError::UnsupportedSize(size))?;
    trace!(size, entries = data.len() / 3, "parsed .cube");

    let expected = resolution.node_count();
    if data.len() != expected * 3 {
        return Err(LutError::InvalidSize(format!(
            "expected {} values, found {}",
            expected,
            data.len() / 3
        )));
    }

    Lattice::from_data(resolution, data)
}

/// Display adapter producing the exported document.
struct CubeText<'a>(&'a Lattice);

impl fmt::Display for CubeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.edge();
        writeln!(f, "{}", TOOL_COMMENT)?;
        writeln!(f, "# LUT size {n}x{n}x{n}")?;
        writeln!(f, "LUT_3D_SIZE {n}")?;
        writeln!(f)?;

        // Storage order is already b-outer / g-middle / r-inner.
        for [r, g, b] in self.0.nodes() {
            writeln!(f, "{:.6} {:.6} {:.6}", normalize(r), normalize(g), normalize(b))?;
        }
        Ok(())
    }
}

#[inline]
fn normalize(v: u8) -> f64 {
    f64::from(v) / 255.0
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// Helper functions

fn parse_size(line: &str) -> LutResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(LutError::Parse("invalid size line".into()));
    }
    parts[1]
        .parse()
        .map_err(|_| LutError::Parse("invalid size value".into()))
}

fn expect_domain(line: &str, bound: f32) -> LutResult<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(LutError::Parse("invalid domain line".into()));
    }
    for part in &parts[1..4] {
        let v: f32 = part
            .parse()
            .map_err(|_| LutError::Parse(format!("invalid domain value: {}", part)))?;
        if v != bound {
            return Err(LutError::Parse(format!("unsupported domain: {}", line)));
        }
    }
    Ok(())
}

fn parse_rgb(line: &str) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(LutError::Parse(format!("invalid RGB line: {}", line)));
    }
    Ok([
        parts[0].parse().map_err(|_| LutError::Parse("invalid R value".into()))?,
        parts[1].parse().map_err(|_| LutError::Parse("invalid G value".into()))?,
        parts[2].parse().map_err(|_| LutError::Parse("invalid B value".into()))?,
    ])
}
