//! Cubic lattice of 8-bit RGB nodes.

use crate::{LutError, LutResult};
use lutgen_core::Resolution;

/// A cubic lattice of `N^3` RGB nodes.
///
/// # Structure
///
/// - `N^3` nodes of three `u8` channels, no alpha
/// - Flat byte layout, node `(r, g, b)` starts at `((b*N + g)*N + r) * 3`
/// - Red varies fastest, then green, then blue. This is also the `.cube`
///   line order, so export and parse are straight copies.
///
/// A lattice is immutable once built; smoothing produces a new one.
///
/// # Example
///
/// ```rust
/// use lutgen_core::Resolution;
/// use lutgen_lut::Lattice;
///
/// let lut = Lattice::identity(Resolution::R17);
/// assert_eq!(lut.get(16, 0, 0), [255, 0, 0]);
/// assert_eq!(lut.get(0, 0, 16), [0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    /// Node bytes: `[r0g0b0: R G B][r1g0b0: R G B]...`
    data: Vec<u8>,
    /// Cube resolution
    resolution: Resolution,
}

impl Lattice {
    /// Creates a lattice from raw node bytes in red-fastest order.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidSize`] unless `data.len() == N^3 * 3`.
    pub fn from_data(resolution: Resolution, data: Vec<u8>) -> LutResult<Self> {
        let expected = resolution.node_count() * 3;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} bytes for {}, got {}",
                expected,
                resolution,
                data.len()
            )));
        }
        Ok(Self { data, resolution })
    }

    /// Wraps bytes already sized `N^3 * 3` by a stage of this crate.
    pub(crate) fn from_raw(resolution: Resolution, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), resolution.node_count() * 3);
        Self { data, resolution }
    }

    /// Creates a lattice where every node is `rgb`.
    pub fn filled(resolution: Resolution, rgb: [u8; 3]) -> Self {
        let data = rgb.repeat(resolution.node_count());
        Self { data, resolution }
    }

    /// Creates the pass-through lattice: node `(r, g, b)` holds its own
    /// coordinates scaled to `0..=255`.
    pub fn identity(resolution: Resolution) -> Self {
        let n = resolution.edge();
        let scale = |i: usize| ((i * 255) as f64 / (n - 1) as f64).round() as u8;
        let mut data = Vec::with_capacity(resolution.node_count() * 3);
        for b in 0..n {
            for g in 0..n {
                for r in 0..n {
                    data.extend_from_slice(&[scale(r), scale(g), scale(b)]);
                }
            }
        }
        Self { data, resolution }
    }

    /// Cube resolution.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Nodes per axis.
    #[inline]
    pub fn edge(&self) -> usize {
        self.resolution.edge()
    }

    /// Byte offset of node `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        let n = self.edge();
        ((b * n + g) * n + r) * 3
    }

    /// Node value at grid position `(r, g, b)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= N`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [u8; 3] {
        let i = self.index(r, g, b);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Raw node bytes in red-fastest order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterates over node values in storage (and export) order.
    pub fn nodes(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}
