//! Lattice sampling from a reference image.
//!
//! Node `(r, g, b)` is the mean color of a 5x5 pixel window centered at
//! `(floor(r/N * width), floor(g/N * height))`. The blue coordinate does not
//! move the window: every blue slab receives the same plane of window means,
//! and only smoothing makes slabs differ.

use crate::{Lattice, Progress};
use lutgen_core::{PixelBuffer, Resolution};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Half-width of the sampling window (5x5 samples).
pub const SAMPLE_RADIUS: i64 = 2;

/// Samples `image` into a raw lattice of resolution `resolution`.
///
/// Samples outside the image are skipped, not clamped, so windows near the
/// border average fewer pixels. A window with no valid sample (zero-sized
/// image) yields black.
///
/// `progress` is called once per node in storage order with
/// `index / N^3 * 100`.
///
/// # Example
///
/// ```rust
/// use lutgen_core::{PixelBuffer, Resolution};
/// use lutgen_lut::{sample, NoProgress};
///
/// let img = PixelBuffer::filled(1, 1, [90, 60, 30, 255]);
/// let raw = sample(&img, Resolution::R17, &mut NoProgress);
/// assert!(raw.nodes().all(|n| n == [90, 60, 30]));
/// ```
pub fn sample<P>(image: &PixelBuffer, resolution: Resolution, progress: &mut P) -> Lattice
where
    P: Progress + ?Sized,
{
    let n = resolution.edge();
    let total = resolution.node_count();
    trace!(width = image.width(), height = image.height(), n, "sample");

    // Storage order is r fastest, then g, then b. The first blue slab is
    // sampled one green row at a time and reported as each row lands; later
    // slabs repeat it.
    let plane = n * n;
    let mut data = Vec::with_capacity(total * 3);
    let mut index = 0;
    for g in 0..n {
        let row: Vec<[u8; 3]> = (0..n)
            .into_par_iter()
            .map(|r| window_mean(image, r, g, n))
            .collect();
        for rgb in row {
            progress.report(index as f32 / total as f32 * 100.0);
            data.extend_from_slice(&rgb);
            index += 1;
        }
    }
    while index < total {
        progress.report(index as f32 / total as f32 * 100.0);
        let src = index % plane * 3;
        data.extend_from_within(src..src + 3);
        index += 1;
    }

    debug!(
        resolution = %resolution,
        width = image.width(),
        height = image.height(),
        "Sampled raw lattice"
    );

    Lattice::from_raw(resolution, data)
}

/// Nominal pixel coordinate for lattice coordinate `i` along an axis of
/// `extent` pixels.
#[inline]
fn nominal(i: usize, n: usize, extent: u32) -> i64 {
    (i as f64 / n as f64 * extent as f64).floor() as i64
}

/// Mean RGB of the in-bounds samples around lattice position `(r, g)`.
fn window_mean(image: &PixelBuffer, r: usize, g: usize, n: usize) -> [u8; 3] {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let cx = nominal(r, n, image.width());
    let cy = nominal(g, n, image.height());
    let bytes = image.as_bytes();

    let mut total = [0u64; 3];
    let mut count = 0u64;
    for sx in -SAMPLE_RADIUS..=SAMPLE_RADIUS {
        for sy in -SAMPLE_RADIUS..=SAMPLE_RADIUS {
            let (x, y) = (cx + sx, cy + sy);
            if x < 0 || x >= width || y < 0 || y >= height {
                continue;
            }
            let i = (y * width + x) as usize * lutgen_core::CHANNELS;
            total[0] += u64::from(bytes[i]);
            total[1] += u64::from(bytes[i + 1]);
            total[2] += u64::from(bytes[i + 2]);
            count += 1;
        }
    }

    if count == 0 {
        return [0, 0, 0];
    }
    total.map(|t| (t as f64 / count as f64).round() as u8)
}
