//! LUT generation command.
//!
//! Samples and smooths a reference image, writes the `.cube` file and
//! optionally renders a preview of another image through the new LUT.

use crate::GenerateArgs;
use anyhow::{Context, Result};
use lutgen_core::{LutSettings, Strength};
use lutgen_lut::{cube, Session};
use std::path::PathBuf;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: GenerateArgs, defaults: LutSettings, verbose: u8) -> Result<()> {
    let settings = LutSettings {
        resolution: args.resolution.unwrap_or(defaults.resolution),
        strength: args.strength.map_or(defaults.strength, Strength::new),
    };
    debug!(
        resolution = %settings.resolution,
        strength = settings.strength.get(),
        "Generate settings"
    );

    let reference = super::load_image(&args.reference)?;
    if verbose > 0 {
        println!(
            "Sampling {} ({}x{}) at {}",
            args.reference.display(),
            reference.width(),
            reference.height(),
            settings.resolution
        );
    }

    let mut session = Session::new(settings);
    let bar = super::percent_bar(!args.no_progress, "Building LUT")?;
    let lattice = session.generate(&reference, &mut |percent: f32| {
        bar.set_position(percent as u64);
    });
    bar.finish_and_clear();

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(cube::file_name(&args.prefix, lattice.resolution())));
    cube::write_file(&output, lattice)
        .with_context(|| format!("Failed to write LUT: {}", output.display()))?;
    println!("Saved LUT: {}", output.display());

    if let (Some(input), Some(preview_out)) = (&args.preview, &args.preview_out) {
        let image = super::load_image(input)?;
        let graded = session
            .preview(&image)
            .context("No LUT available for preview")?;
        super::save_image(preview_out, &graded)?;
        info!(
            input = %input.display(),
            strength = settings.strength.get(),
            "Preview rendered"
        );
        println!("Saved preview: {}", preview_out.display());
    }

    Ok(())
}
