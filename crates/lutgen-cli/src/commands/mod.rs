//! CLI command implementations

pub mod apply;
pub mod generate;
pub mod info;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lutgen_core::{LutSettings, PixelBuffer};
use std::fs;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    lutgen_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    lutgen_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Reads `--settings`, or returns the defaults when no file is given.
///
/// Missing fields fall back to their defaults.
pub fn load_settings(path: Option<&Path>) -> Result<LutSettings> {
    let Some(path) = path else {
        return Ok(LutSettings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid settings: {}", path.display()))
}

/// Percent bar for LUT generation; hidden when `enabled` is false.
pub fn percent_bar(enabled: bool, message: &'static str) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos:>3}%")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );
    bar.set_message(message);
    Ok(bar)
}
