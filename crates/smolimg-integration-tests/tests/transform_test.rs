use image::{DynamicImage, GenericImageView};
use smolimg_common::OutputFormat;
use smolimg_core::{process_batch, transform, BatchItem, TransformRequest};
use std::io::Cursor;

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let mut img = DynamicImage::new_rgb8(width, height);
    let rgb_img = img.as_mut_rgb8().unwrap();
    for (x, y, pixel) in rgb_img.enumerate_pixels_mut() {
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        let b = (((x + y) as f32 / (width + height) as f32) * 255.0) as u8;
        *pixel = image::Rgb([r, g, b]);
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// JPEG carrying an EXIF APP1 segment with the given orientation value,
/// spliced in right after SOI
fn oriented_jpeg(width: u32, height: u32, orientation: u8) -> Vec<u8> {
    let img = DynamicImage::new_rgb8(width, height);
    let mut jpeg = Vec::new();
    img.write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();

    let mut exif = Vec::new();
    exif.extend_from_slice(b"Exif\0\0");
    // Little-endian TIFF header, one IFD0 entry: tag 0x0112 (Orientation)
    exif.extend_from_slice(&[0x49, 0x49, 0x2a, 0x00, 0x08, 0x00, 0x00, 0x00]);
    exif.extend_from_slice(&[0x01, 0x00]);
    exif.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
    exif.extend_from_slice(&[orientation, 0x00, 0x00, 0x00]);
    exif.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let mut out = Vec::with_capacity(jpeg.len() + exif.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xff, 0xe1]);
    out.extend_from_slice(&(exif.len() as u16 + 2).to_be_bytes());
    out.extend_from_slice(&exif);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[test]
fn test_output_decodes_as_requested_format() {
    let bytes = gradient_png(320, 240);

    for format in [OutputFormat::Webp, OutputFormat::Jpeg, OutputFormat::Png] {
        for quality in [1, 50, 100] {
            let request = TransformRequest::new(quality, format, 100);
            let result = transform(&bytes, &request).unwrap();

            let detected = image::guess_format(&result.data).unwrap();
            assert_eq!(
                detected,
                format.to_image_format(),
                "format {} quality {}",
                format,
                quality
            );
            assert_eq!(result.mime_type, format.mime_type());
        }
    }
}

#[test]
fn test_resize_dimensions_across_formats() {
    let bytes = gradient_png(333, 217);

    for format in [OutputFormat::Webp, OutputFormat::Jpeg, OutputFormat::Png] {
        let request = TransformRequest::new(80, format, 60);
        let result = transform(&bytes, &request).unwrap();

        let output = image::load_from_memory(&result.data).unwrap();
        // floor(333 * 60 / 100) = 199, floor(217 * 60 / 100) = 130
        assert_eq!(output.dimensions(), (199, 130), "format {}", format);
    }
}

#[test]
fn test_rotated_jpeg_comes_out_upright() {
    // Orientation 6 = rotate 90 CW, so the 40x20 frame is logically 20x40
    let bytes = oriented_jpeg(40, 20, 6);

    let full = transform(&bytes, &TransformRequest::new(80, OutputFormat::Png, 100)).unwrap();
    let output = image::load_from_memory(&full.data).unwrap();
    assert_eq!(output.dimensions(), (20, 40));

    // Resize percentages apply to the upright dimensions
    let half = transform(&bytes, &TransformRequest::new(80, OutputFormat::Png, 50)).unwrap();
    let output = image::load_from_memory(&half.data).unwrap();
    assert_eq!(output.dimensions(), (10, 20));
}

#[test]
fn test_savings_match_reported_sizes() {
    let bytes = gradient_png(640, 480);
    let request = TransformRequest::new(60, OutputFormat::Jpeg, 100);

    let result = transform(&bytes, &request).unwrap();

    assert_eq!(result.original_size, bytes.len());
    assert_eq!(result.compressed_size, result.data.len());

    let expected =
        (1.0 - result.compressed_size as f64 / result.original_size as f64) * 100.0;
    let expected = (expected * 10.0).round() / 10.0;
    assert_eq!(result.savings_pct, expected);
}

#[test]
fn test_batch_with_corrupt_file_yields_partial_results() {
    let items = vec![
        BatchItem {
            name: "one.png".to_string(),
            bytes: gradient_png(100, 100),
        },
        BatchItem {
            name: "broken.png".to_string(),
            bytes: vec![0x42; 128],
        },
        BatchItem {
            name: "two.png".to_string(),
            bytes: gradient_png(80, 80),
        },
    ];

    let request = TransformRequest::new(80, OutputFormat::Webp, 100);
    let outcomes = process_batch(items, &request);

    let successes: Vec<_> = outcomes.iter().filter(|o| o.is_ok()).collect();
    let failures: Vec<_> = outcomes.iter().filter(|o| !o.is_ok()).collect();

    assert_eq!(successes.len(), 2);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "broken.png");
}

#[test]
fn test_quality_ordering_for_lossy_formats() {
    let bytes = gradient_png(800, 600);

    for format in [OutputFormat::Webp, OutputFormat::Jpeg] {
        let low = transform(&bytes, &TransformRequest::new(20, format, 100)).unwrap();
        let high = transform(&bytes, &TransformRequest::new(95, format, 100)).unwrap();

        assert!(
            low.compressed_size <= high.compressed_size,
            "{}: low quality ({} bytes) should not exceed high quality ({} bytes)",
            format,
            low.compressed_size,
            high.compressed_size
        );
    }
}
