use lutgen_core::PixelBuffer;
use lutgen_io::{decode, read, write, Format, IoError};

fn is_unavailable<T>(result: Result<T, IoError>) -> bool {
    matches!(result, Err(IoError::Core(lutgen_core::Error::ResourceUnavailable(_))))
}

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = ((x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8);
            data.extend_from_slice(&[r, g, b, 255 - x as u8]);
        }
    }
    PixelBuffer::from_rgba(width, height, data).unwrap()
}

#[test]
fn png_file_roundtrip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradient.png");
    let image = gradient(20, 12);

    write(&path, &image).unwrap();
    assert_eq!(Format::detect(&path).unwrap(), Format::Png);
    assert_eq!(read(&path).unwrap(), image);
}

#[test]
fn jpeg_file_roundtrip_keeps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradient.JPG");
    let image = gradient(33, 17);

    write(&path, &image).unwrap();
    let loaded = read(&path).unwrap();
    assert_eq!(loaded.dimensions(), (33, 17));
    assert!(loaded.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn detection_uses_content_not_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("actually_png.jpg");
    let image = gradient(4, 4);
    std::fs::write(&path, lutgen_io::png::encode(&image).unwrap()).unwrap();

    assert_eq!(read(&path).unwrap(), image);
    assert_eq!(decode(&std::fs::read(&path).unwrap()).unwrap(), image);
}

#[test]
fn unknown_formats_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let image = gradient(2, 2);

    let err = write(dir.path().join("out.tiff"), &image).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "tiff"));

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "hello").unwrap();
    assert!(is_unavailable(read(&text)));
    assert!(is_unavailable(decode(b"hello")));
}

#[test]
fn unreadable_images_are_unavailable() {
    let dir = tempfile::tempdir().unwrap();

    assert!(is_unavailable(read(dir.path().join("missing.png"))));
    assert!(is_unavailable(read(dir.path().join("missing.jpg"))));

    let garbage = dir.path().join("garbage.png");
    std::fs::write(&garbage, b"definitely not pixels").unwrap();
    assert!(is_unavailable(read(&garbage)));

    let truncated = dir.path().join("truncated.jpg");
    std::fs::write(&truncated, [0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
    assert!(is_unavailable(read(&truncated)));

    let err = read(dir.path().join("missing.png")).unwrap_err();
    assert!(err.to_string().starts_with("pixel data unavailable: "));
}
