//! LUT generation settings: lattice resolution and blend strength.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lattice edge length.
///
/// Every lattice holds `N^3` nodes where `N` is [`Resolution::edge`].
///
/// # Example
///
/// ```rust
/// use lutgen_core::Resolution;
///
/// let res: Resolution = "33x33x33".parse().unwrap();
/// assert_eq!(res.edge(), 33);
/// assert_eq!(res.to_string(), "33x33x33");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// 17 nodes per axis.
    #[default]
    #[serde(rename = "17x17x17")]
    R17,
    /// 33 nodes per axis.
    #[serde(rename = "33x33x33")]
    R33,
    /// 64 nodes per axis.
    #[serde(rename = "64x64x64")]
    R64,
}

impl Resolution {
    /// All supported resolutions, smallest first.
    pub const ALL: [Resolution; 3] = [Resolution::R17, Resolution::R33, Resolution::R64];

    /// Nodes per axis.
    #[inline]
    pub const fn edge(self) -> usize {
        match self {
            Resolution::R17 => 17,
            Resolution::R33 => 33,
            Resolution::R64 => 64,
        }
    }

    /// Total node count, `N^3`.
    #[inline]
    pub const fn node_count(self) -> usize {
        let n = self.edge();
        n * n * n
    }

    /// Selector token, e.g. `17x17x17`.
    pub const fn token(self) -> &'static str {
        match self {
            Resolution::R17 => "17x17x17",
            Resolution::R33 => "33x33x33",
            Resolution::R64 => "64x64x64",
        }
    }

    /// Looks up the resolution with the given edge length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResolution`] for any edge other than 17, 33, 64.
    pub fn from_edge(edge: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.edge() == edge)
            .ok_or_else(|| Error::InvalidResolution(edge.to_string()))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    /// Accepts the selector tokens and the bare edge length.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(res) = Self::ALL.into_iter().find(|r| r.token() == s) {
            return Ok(res);
        }
        match s.parse::<usize>() {
            Ok(edge) => Self::from_edge(edge),
            Err(_) => Err(Error::InvalidResolution(s.to_string())),
        }
    }
}

/// Blend factor between an untouched pixel (0) and the LUT-mapped pixel (1).
///
/// Out-of-range input is clamped into `[0, 1]`; NaN maps to 0 so a bad value
/// degrades to the identity transform.
///
/// ```rust
/// use lutgen_core::Strength;
///
/// assert_eq!(Strength::new(1.7).get(), 1.0);
/// assert_eq!(Strength::new(-0.2).get(), 0.0);
/// assert_eq!(Strength::new(f32::NAN).get(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Strength(f32);

impl Strength {
    /// No change.
    pub const NONE: Strength = Strength(0.0);
    /// Full LUT mapping.
    pub const FULL: Strength = Strength(1.0);

    /// Clamps `value` into `[0, 1]`.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::NONE;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// The clamped value.
    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<f32> for Strength {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Strength> for f32 {
    fn from(s: Strength) -> Self {
        s.0
    }
}

/// User-facing generation settings.
///
/// Serializes as `{"resolution": "17x17x17", "strength": 1.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LutSettings {
    /// Lattice resolution used for the next generation.
    pub resolution: Resolution,
    /// Blend strength used when applying.
    pub strength: Strength,
}
