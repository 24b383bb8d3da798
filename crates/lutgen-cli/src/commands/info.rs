//! LUT info command.
//!
//! Prints the lattice size and per-channel value ranges of `.cube` files.

use crate::InfoArgs;
use anyhow::{Context, Result};
use lutgen_lut::{cube, Lattice};
use serde::Serialize;
use std::path::Path;

/// Value range of one output channel, normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct ChannelStats {
    min: f64,
    mean: f64,
    max: f64,
}

#[derive(Debug, Serialize)]
struct LutInfo {
    file: String,
    resolution: String,
    entries: usize,
    red: ChannelStats,
    green: ChannelStats,
    blue: ChannelStats,
}

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    let mut reports = Vec::with_capacity(args.input.len());
    for path in &args.input {
        let lattice = cube::read_file(path)
            .with_context(|| format!("Failed to load LUT: {}", path.display()))?;
        reports.push(describe(path, &lattice));
    }

    if args.json {
        // One object for one file, an array otherwise.
        let json = match reports.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            all => serde_json::to_string_pretty(all)?,
        };
        println!("{json}");
        return Ok(());
    }

    for (idx, report) in reports.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        print_text(report, verbose);
    }
    Ok(())
}

fn describe(path: &Path, lattice: &Lattice) -> LutInfo {
    let [red, green, blue] = channel_stats(lattice);
    LutInfo {
        file: path.display().to_string(),
        resolution: lattice.resolution().token().to_string(),
        entries: lattice.resolution().node_count(),
        red,
        green,
        blue,
    }
}

fn print_text(info: &LutInfo, verbose: u8) {
    println!("{}", info.file);
    println!("  Size:    {}", info.resolution);
    if verbose > 0 {
        println!("  Entries: {}", info.entries);
    }
    for (name, stats) in [("R", info.red), ("G", info.green), ("B", info.blue)] {
        println!(
            "  {}: min {:.6}  mean {:.6}  max {:.6}",
            name, stats.min, stats.mean, stats.max
        );
    }
}

fn channel_stats(lattice: &Lattice) -> [ChannelStats; 3] {
    let mut min = [u8::MAX; 3];
    let mut max = [u8::MIN; 3];
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for node in lattice.nodes() {
        for c in 0..3 {
            min[c] = min[c].min(node[c]);
            max[c] = max[c].max(node[c]);
            sum[c] += u64::from(node[c]);
        }
        count += 1;
    }

    std::array::from_fn(|c| ChannelStats {
        min: f64::from(min[c]) / 255.0,
        mean: sum[c] as f64 / count.max(1) as f64 / 255.0,
        max: f64::from(max[c]) / 255.0,
    })
}
