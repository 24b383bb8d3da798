//! # lutgen-core
//!
//! Core types shared by the lutgen crates.
//!
//! - [`PixelBuffer`] - immutable 8-bit RGBA image handed to and returned by
//!   the LUT engine
//! - [`Resolution`] - lattice edge length (17, 33 or 64)
//! - [`Strength`] - clamped blend factor for LUT application
//! - [`LutSettings`] - resolution + strength, serializable
//! - [`Error`] / [`Result`] - error handling
//!
//! ## Crate Structure
//!
//! ```text
//! lutgen-core (this crate)
//!    ^
//!    |
//!    +-- lutgen-lut (sampling, smoothing, applying, .cube export)
//!    +-- lutgen-io (PNG/JPEG decode and encode)
//!    +-- lutgen-cli (command-line front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod settings;

pub use error::{Error, Result};
pub use image::{PixelBuffer, CHANNELS};
pub use settings::{LutSettings, Resolution, Strength};
