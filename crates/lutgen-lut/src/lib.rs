//! # lutgen-lut
//!
//! Extracts a 3D color lookup table from a reference image, applies it to
//! other images, and reads/writes it as `.cube` text.
//!
//! # Pipeline
//!
//! ```text
//! reference image -> sample -> raw lattice -> smooth -> lattice
//!                                                        |
//!                                 +----------------------+------------+
//!                                 v                                   v
//!                  apply(target, strength) -> image        cube::export -> text
//! ```
//!
//! - [`sample`] - 5x5 window means on a cubic grid of image positions
//! - [`smooth`] - 3x3x3 box filter over the lattice
//! - [`apply`] - trilinear lookup blended by [`Strength`](lutgen_core::Strength)
//! - [`cube`] - `.cube` export and parsing
//! - [`Session`] - generate / preview / export workflow state
//!
//! Every stage is a pure function returning a new value. Sampling,
//! smoothing and applying run on the rayon thread pool; each stage returns
//! only once its whole output is written.
//!
//! # Usage
//!
//! ```rust
//! use lutgen_core::{PixelBuffer, Resolution, Strength};
//! use lutgen_lut::{apply, cube, generate, NoProgress};
//!
//! let reference = PixelBuffer::filled(32, 32, [180, 120, 60, 255]);
//! let lut = generate(&reference, Resolution::R17, &mut NoProgress);
//!
//! let target = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
//! let graded = apply(&target, &lut, Strength::new(0.5));
//! assert_eq!(graded.pixel(0, 0), Some([90, 60, 30, 255]));
//!
//! let text = cube::export(&lut);
//! assert_eq!(text.lines().count(), 4 + 17 * 17 * 17);
//! ```
//!
//! # Dependencies
//!
//! - `lutgen-core` - pixel buffer, resolution and strength types
//! - [`rayon`] - parallel stages
//! - [`thiserror`] - error handling
//! - [`tracing`] - stage logging

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod apply;
mod error;
mod lattice;
mod progress;
mod sample;
mod session;
mod smooth;
pub mod cube;

pub use apply::{apply, apply_pixel};
pub use error::{LutError, LutResult};
pub use lattice::Lattice;
pub use progress::{NoProgress, Progress};
pub use sample::{sample, SAMPLE_RADIUS};
pub use session::Session;
pub use smooth::{smooth, SMOOTH_RADIUS};

use lutgen_core::{PixelBuffer, Resolution};

/// Samples `reference` and smooths the result: the full "generate LUT" step.
///
/// The raw lattice is complete before smoothing starts.
pub fn generate<P>(reference: &PixelBuffer, resolution: Resolution, progress: &mut P) -> Lattice
where
    P: Progress + ?Sized,
{
    let raw = sample(reference, resolution, progress);
    smooth(&raw)
}
