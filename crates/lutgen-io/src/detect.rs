//! Format detection from file extensions and magic bytes.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path.
    ///
    /// Checks magic bytes first, falls back to the extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") | Some("jpe") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];
        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 'P' 'N' 'G' CR LF SUB LF
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Format::Png;
        }

        // JPEG: SOI followed by a marker
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Format::Jpeg;
        }

        Format::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("ref.PNG"), Format::Png);
        assert_eq!(Format::from_extension("shot.jpeg"), Format::Jpeg);
        assert_eq!(Format::from_extension("shot.jpg"), Format::Jpeg);
        assert_eq!(Format::from_extension("grade.cube"), Format::Unknown);
        assert_eq!(Format::from_extension("no_extension"), Format::Unknown);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(Format::from_bytes(b"\x89PNG\r\n\x1a\n"), Format::Png);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Format::Jpeg);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8]), Format::Unknown);
        assert_eq!(Format::from_bytes(b""), Format::Unknown);
    }

    #[test]
    fn test_magic_wins_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabeled.jpg");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nrest").unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Png);

        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").unwrap();
        assert_eq!(Format::detect(&empty).unwrap(), Format::Png);
    }
}
