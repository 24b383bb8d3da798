//! LUT application command

use crate::ApplyArgs;
use anyhow::{Context, Result};
use lutgen_core::{LutSettings, Strength};
use lutgen_lut::cube;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ApplyArgs, defaults: LutSettings, verbose: u8) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let lattice = cube::read_file(&args.lut)
        .with_context(|| format!("Failed to load LUT: {}", args.lut.display()))?;
    let strength = args.strength.map_or(defaults.strength, Strength::new);

    if verbose > 0 {
        println!(
            "Applying LUT {} ({}) to {} at strength {}",
            args.lut.display(),
            lattice.resolution(),
            args.input.display(),
            strength.get()
        );
    }

    let result = lutgen_lut::apply(&image, &lattice, strength);
    super::save_image(&args.output, &result)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
