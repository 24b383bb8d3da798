//! Applying a lattice to an image with trilinear interpolation.
//!
//! Each channel value `c` maps to the lattice coordinate
//! `t = c / 255 * (N - 1)`; the eight nodes around `t` are blended along
//! red, then green, then blue. All arithmetic runs in `f64`. The result is
//! mixed with the original pixel by [`Strength`], so strength 0 is an exact
//! identity.

use crate::Lattice;
use lutgen_core::{PixelBuffer, Strength};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Maps every pixel of `image` through `lattice`, returning a new buffer.
///
/// Alpha is copied unchanged. Output channels are rounded (ties to even)
/// and clamped to `0..=255`.
///
/// # Example
///
/// ```rust
/// use lutgen_core::{PixelBuffer, Resolution, Strength};
/// use lutgen_lut::{apply, Lattice};
///
/// let img = PixelBuffer::filled(2, 2, [12, 200, 99, 128]);
/// let lut = Lattice::filled(Resolution::R17, [255, 0, 0]);
///
/// let out = apply(&img, &lut, Strength::FULL);
/// assert_eq!(out.pixel(1, 1), Some([255, 0, 0, 128]));
///
/// let same = apply(&img, &lut, Strength::NONE);
/// assert_eq!(same, img);
/// ```
pub fn apply(image: &PixelBuffer, lattice: &Lattice, strength: Strength) -> PixelBuffer {
    trace!(
        width = image.width(),
        height = image.height(),
        n = lattice.edge(),
        strength = strength.get(),
        "apply"
    );

    let out = image.par_map_pixels(|px| {
        let mapped = apply_pixel(lattice, [px[0], px[1], px[2]], strength);
        px[..3].copy_from_slice(&mapped);
    });

    debug!(
        width = image.width(),
        height = image.height(),
        resolution = %lattice.resolution(),
        "Applied lattice"
    );
    out
}

/// Maps one RGB triple through `lattice` and blends it with `strength`.
///
/// ```rust
/// use lutgen_core::{Resolution, Strength};
/// use lutgen_lut::{apply_pixel, Lattice};
///
/// let lut = Lattice::identity(Resolution::R33);
/// assert_eq!(apply_pixel(&lut, [0, 128, 255], Strength::FULL), [0, 128, 255]);
/// ```
pub fn apply_pixel(lattice: &Lattice, rgb: [u8; 3], strength: Strength) -> [u8; 3] {
    let interpolated = trilinear(lattice, rgb);
    let s = f64::from(strength.get());
    let mut out = [0u8; 3];
    for c in 0..3 {
        let original = f64::from(rgb[c]);
        let blended = original + (interpolated[c] - original) * s;
        out[c] = blended.round_ties_even().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Lower node index, upper node index and fractional weight along one axis.
#[inline]
fn axis(c: u8, n: usize) -> (usize, usize, f64) {
    let t = f64::from(c) / 255.0 * (n - 1) as f64;
    let i0 = (t.floor() as usize).min(n - 1);
    let i1 = (i0 + 1).min(n - 1);
    (i0, i1, t - i0 as f64)
}

/// Unblended trilinear lookup, channel values in `0.0..=255.0`.
fn trilinear(lattice: &Lattice, rgb: [u8; 3]) -> [f64; 3] {
    let n = lattice.edge();
    let (r0, r1, rw) = axis(rgb[0], n);
    let (g0, g1, gw) = axis(rgb[1], n);
    let (b0, b1, bw) = axis(rgb[2], n);

    let c000 = lattice.get(r0, g0, b0);
    let c100 = lattice.get(r1, g0, b0);
    let c010 = lattice.get(r0, g1, b0);
    let c110 = lattice.get(r1, g1, b0);
    let c001 = lattice.get(r0, g0, b1);
    let c101 = lattice.get(r1, g0, b1);
    let c011 = lattice.get(r0, g1, b1);
    let c111 = lattice.get(r1, g1, b1);

    let lerp = |a: u8, b: u8, w: f64| f64::from(a) * (1.0 - w) + f64::from(b) * w;

    let mut result = [0.0f64; 3];
    for i in 0..3 {
        let c00 = lerp(c000[i], c100[i], rw);
        let c01 = lerp(c001[i], c101[i], rw);
        let c10 = lerp(c010[i], c110[i], rw);
        let c11 = lerp(c011[i], c111[i], rw);

        let c0 = c00 * (1.0 - gw) + c10 * gw;
        let c1 = c01 * (1.0 - gw) + c11 * gw;

        result[i] = c0 * (1.0 - bw) + c1 * bw;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutgen_core::Resolution;

    #[test]
    fn test_axis_weights() {
        assert_eq!(axis(0, 17), (0, 1, 0.0));
        assert_eq!(axis(255, 17), (16, 16, 0.0));
        // 85 / 255 * 63 = 21 exactly.
        assert_eq!(axis(85, 64), (21, 22, 0.0));
        let (i0, i1, w) = axis(128, 17);
        assert_eq!((i0, i1), (8, 9));
        assert!((w - 0.031_372_549_019_6).abs() < 1e-12);
    }

    #[test]
    fn test_grid_exact_node() {
        let mut data = vec![0u8; Resolution::R64.node_count() * 3];
        let layout = Lattice::filled(Resolution::R64, [0, 0, 0]);
        let i = layout.index(21, 42, 63);
        data[i..i + 3].copy_from_slice(&[7, 77, 177]);
        let lut = Lattice::from_data(Resolution::R64, data).unwrap();

        assert_eq!(apply_pixel(&lut, [85, 170, 255], Strength::FULL), [7, 77, 177]);
    }

    #[test]
    fn test_midpoint_blend() {
        // Red axis only: nodes alternate 0 / 200 on r; value 8 at N=17 sits
        // at t = 8 * 16 / 255 = 0.50196, halfway between r=0 and r=1.
        let n = 17;
        let mut data = Vec::with_capacity(n * n * n * 3);
        for _b in 0..n {
            for _g in 0..n {
                for r in 0..n {
                    let v = if r % 2 == 0 { 0 } else { 200 };
                    data.extend_from_slice(&[v, v, v]);
                }
            }
        }
        let lut = Lattice::from_data(Resolution::R17, data).unwrap();
        let out = trilinear(&lut, [8, 0, 0]);
        assert!((out[0] - 100.392_156_862_745).abs() < 1e-9);
    }

    #[test]
    fn test_strength_blend() {
        let lut = Lattice::filled(Resolution::R17, [200, 200, 200]);
        assert_eq!(apply_pixel(&lut, [100, 0, 250], Strength::new(0.5)), [150, 100, 225]);
        assert_eq!(apply_pixel(&lut, [100, 0, 250], Strength::NONE), [100, 0, 250]);
    }

    #[test]
    fn test_alpha_and_input_preserved() {
        let img = PixelBuffer::from_rgba(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 77]).unwrap();
        let before = img.clone();
        let lut = Lattice::filled(Resolution::R33, [1, 2, 3]);
        let out = apply(&img, &lut, Strength::FULL);
        assert_eq!(out.as_bytes(), &[1, 2, 3, 0, 1, 2, 3, 77]);
        assert_eq!(img, before);
    }

    #[test]
    fn test_empty_image() {
        let img = PixelBuffer::new(0, 3);
        let out = apply(&img, &Lattice::identity(Resolution::R17), Strength::FULL);
        assert!(out.is_empty());
    }

    /// Straight-line rendition of the lookup with no shared helpers.
    fn reference_pixel(lut: &Lattice, rgb: [u8; 3], strength: f64) -> [u8; 3] {
        let n = lut.edge();
        let max = (n - 1) as f64;
        let coord = |c: u8| {
            let t = c as f64 / 255.0 * max;
            let lo = t.floor() as usize;
            (lo, (lo + 1).min(n - 1), t - lo as f64)
        };
        let (r0, r1, rw) = coord(rgb[0]);
        let (g0, g1, gw) = coord(rgb[1]);
        let (b0, b1, bw) = coord(rgb[2]);
        let v = |r, g, b, i: usize| lut.get(r, g, b)[i] as f64;

        let mut out = [0u8; 3];
        for i in 0..3 {
            let c00 = v(r0, g0, b0, i) * (1.0 - rw) + v(r1, g0, b0, i) * rw;
            let c01 = v(r0, g0, b1, i) * (1.0 - rw) + v(r1, g0, b1, i) * rw;
            let c10 = v(r0, g1, b0, i) * (1.0 - rw) + v(r1, g1, b0, i) * rw;
            let c11 = v(r0, g1, b1, i) * (1.0 - rw) + v(r1, g1, b1, i) * rw;
            let c0 = c00 * (1.0 - gw) + c10 * gw;
            let c1 = c01 * (1.0 - gw) + c11 * gw;
            let interp = c0 * (1.0 - bw) + c1 * bw;
            let original = rgb[i] as f64;
            let blended = original + (interp - original) * strength;
            out[i] = blended.round_ties_even().clamp(0.0, 255.0) as u8;
        }
        out
    }

    #[test]
    fn test_matches_double_precision_reference() {
        // xorshift32 noise so every cell has distinct corners
        let mut state = 0x9E37_79B9u32;
        let data: Vec<u8> = (0..Resolution::R17.node_count() * 3)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        let lut = Lattice::from_data(Resolution::R17, data).unwrap();

        for strength in [Strength::FULL, Strength::new(0.5), Strength::new(0.3)] {
            let s = f64::from(strength.get());
            for r in (0..=255u8).step_by(3) {
                for g in (0..=255u8).step_by(5) {
                    for b in (0..=255u8).step_by(3) {
                        let rgb = [r, g, b];
                        assert_eq!(
                            apply_pixel(&lut, rgb, strength),
                            reference_pixel(&lut, rgb, s),
                            "rgb {rgb:?} strength {s}"
                        );
                    }
                }
            }
        }
    }
}
