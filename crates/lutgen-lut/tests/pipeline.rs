use approx::assert_relative_eq;
use lutgen_core::{PixelBuffer, Resolution, Strength};
use lutgen_lut::{apply, apply_pixel, cube, generate, sample, smooth, Lattice, NoProgress};

/// Deterministic pseudo-random RGBA image.
fn noise_image(width: u32, height: u32, seed: u32) -> PixelBuffer {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        for _ in 0..4 {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data.push((state >> 24) as u8);
        }
    }
    PixelBuffer::from_rgba(width, height, data).unwrap()
}

#[test]
fn grid_exactness_at_full_strength() {
    let reference = noise_image(64, 48, 3);
    let lut = generate(&reference, Resolution::R64, &mut NoProgress);

    // At N = 64, channel values 0, 85, 170, 255 land exactly on nodes 0, 21, 42, 63.
    for (c, node) in [(0u8, 0usize), (85, 21), (170, 42), (255, 63)] {
        for (d, other) in [(0u8, 0usize), (255, 63)] {
            let out = apply_pixel(&lut, [c, d, c], Strength::FULL);
            assert_eq!(out, lut.get(node, other, node));
        }
    }

    // At N = 17 only the extremes are exact.
    let lut17 = generate(&reference, Resolution::R17, &mut NoProgress);
    assert_eq!(apply_pixel(&lut17, [255, 0, 255], Strength::FULL), lut17.get(16, 0, 16));
}

#[test]
fn zero_strength_is_identity() {
    let image = noise_image(37, 23, 11);
    for res in Resolution::ALL {
        let lut = generate(&noise_image(20, 20, res.edge() as u32), res, &mut NoProgress);
        assert_eq!(apply(&image, &lut, Strength::NONE), image);
        // Out-of-range strength clamps to the same identity.
        assert_eq!(apply(&image, &lut, Strength::new(-3.0)), image);
    }
}

#[test]
fn flat_image_samples_flat() {
    let image = PixelBuffer::filled(50, 30, [17, 140, 233, 255]);
    let raw = sample(&image, Resolution::R33, &mut NoProgress);
    assert!(raw.nodes().all(|n| n == [17, 140, 233]));
}

#[test]
fn smoother_preserves_flat_fields() {
    for res in Resolution::ALL {
        let flat = Lattice::filled(res, [3, 128, 254]);
        assert_eq!(smooth(&flat), flat);
    }
}

#[test]
fn export_line_count_n17() {
    let lut = generate(&noise_image(10, 10, 5), Resolution::R17, &mut NoProgress);
    let text = cube::export(&lut);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3 + 1 + 4913);
    assert!(lines[0].starts_with('#'));
    assert_eq!(lines[1], "# LUT size 17x17x17");
    assert_eq!(lines[2], "LUT_3D_SIZE 17");
    assert_eq!(lines[3], "");
    for line in &lines[4..] {
        let values: Vec<&str> = line.split(' ').collect();
        assert_eq!(values.len(), 3);
        for v in values {
            let (int, frac) = v.split_once('.').unwrap();
            assert!(int == "0" || int == "1");
            assert_eq!(frac.len(), 6);
        }
    }
}

#[test]
fn export_is_deterministic() {
    let lut = generate(&noise_image(40, 40, 9), Resolution::R33, &mut NoProgress);
    assert_eq!(cube::export(&lut), cube::export(&lut));

    let mut buf = Vec::new();
    cube::write(&mut buf, &lut).unwrap();
    assert_eq!(buf, cube::export(&lut).into_bytes());
}

#[test]
fn export_parse_roundtrip() {
    for res in Resolution::ALL {
        let lut = generate(&noise_image(31, 17, 21), res, &mut NoProgress);
        let parsed = cube::parse(cube::export(&lut).as_bytes()).unwrap();
        assert_eq!(parsed, lut);
    }
}

#[test]
fn single_pixel_reference() {
    let image = PixelBuffer::filled(1, 1, [201, 7, 99, 0]);
    for res in Resolution::ALL {
        let raw = sample(&image, res, &mut NoProgress);
        assert_eq!(raw.nodes().count(), res.node_count());
        assert!(raw.nodes().all(|n| n == [201, 7, 99]));
    }
}

#[test]
fn progress_is_monotonic() {
    let image = noise_image(30, 30, 1);
    let mut seen: Vec<f32> = Vec::new();
    sample(&image, Resolution::R17, &mut |p: f32| seen.push(p));

    assert_eq!(seen.len(), 4913);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(seen.iter().all(|p| (0.0..=100.0).contains(p)));
    assert_eq!(seen[0], 0.0);
    assert_relative_eq!(seen[4912], 4912.0 / 4913.0 * 100.0, max_relative = 1e-6);
}

#[test]
fn degenerate_images_do_not_panic() {
    for (w, h) in [(0, 0), (0, 10), (10, 0)] {
        let image = PixelBuffer::new(w, h);
        let lut = generate(&image, Resolution::R17, &mut NoProgress);
        assert!(lut.nodes().all(|n| n == [0, 0, 0]));
        assert!(apply(&image, &lut, Strength::FULL).is_empty());
    }
}

#[test]
fn full_strength_output_stays_in_lattice_range() {
    let reference = noise_image(25, 25, 77);
    let lut = generate(&reference, Resolution::R33, &mut NoProgress);
    let (lo, hi) = lut.as_bytes().iter().fold((255u8, 0u8), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let out = apply(&noise_image(16, 16, 4), &lut, Strength::new(7.5));
    for px in out.as_bytes().chunks_exact(4) {
        for &c in &px[..3] {
            assert!(c >= lo && c <= hi);
        }
    }
}
