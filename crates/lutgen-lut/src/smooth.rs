//! 3x3x3 box filter over a lattice.

use crate::Lattice;
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Neighborhood radius in lattice units (Chebyshev distance).
pub const SMOOTH_RADIUS: isize = 1;

/// Averages every node with its in-bounds neighbors.
///
/// Each output node is the rounded mean of the up to 27 nodes within
/// Chebyshev distance 1 of it; neighbors outside the cube are left out of
/// both the sum and the count (27 inside, 18 on a face, 12 on an edge,
/// 8 at a corner). Reads only `raw` and returns a new lattice.
///
/// # Example
///
/// ```rust
/// use lutgen_core::Resolution;
/// use lutgen_lut::{smooth, Lattice};
///
/// let flat = Lattice::filled(Resolution::R17, [40, 80, 120]);
/// assert_eq!(smooth(&flat), flat);
/// ```
pub fn smooth(raw: &Lattice) -> Lattice {
    let n = raw.edge();
    let resolution = raw.resolution();
    trace!(n, "smooth");

    let mut data = vec![0u8; resolution.node_count() * 3];
    data.par_chunks_mut(n * n * 3)
        .enumerate()
        .for_each(|(b, slab)| {
            for g in 0..n {
                for r in 0..n {
                    let out = (g * n + r) * 3;
                    slab[out..out + 3].copy_from_slice(&neighborhood_mean(raw, r, g, b));
                }
            }
        });

    debug!(resolution = %resolution, "Smoothed lattice");
    Lattice::from_raw(resolution, data)
}

fn neighborhood_mean(raw: &Lattice, r: usize, g: usize, b: usize) -> [u8; 3] {
    let n = raw.edge() as isize;
    let (r, g, b) = (r as isize, g as isize, b as isize);

    let mut sum = [0u32; 3];
    let mut count = 0u32;
    for db in -SMOOTH_RADIUS..=SMOOTH_RADIUS {
        for dg in -SMOOTH_RADIUS..=SMOOTH_RADIUS {
            for dr in -SMOOTH_RADIUS..=SMOOTH_RADIUS {
                let (nb, ng, nr) = (b + db, g + dg, r + dr);
                if nb < 0 || nb >= n || ng < 0 || ng >= n || nr < 0 || nr >= n {
                    continue;
                }
                let node = raw.get(nr as usize, ng as usize, nb as usize);
                sum[0] += u32::from(node[0]);
                sum[1] += u32::from(node[1]);
                sum[2] += u32::from(node[2]);
                count += 1;
            }
        }
    }

    sum.map(|s| (f64::from(s) / f64::from(count)).round() as u8)
}
