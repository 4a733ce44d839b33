use image::DynamicImage;
use smolimg_common::{Error, OutputFormat, Result};
use std::io::Cursor;

/// Quality-controlled in-memory encoder
pub struct ImageEncoder;

impl ImageEncoder {
    /// Encode a pixel buffer into `format` at the given quality (1-100),
    /// with size optimization enabled for every format.
    pub fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        let quality = quality.clamp(1, 100);

        tracing::debug!(
            "Encoding {}x{} to {} (quality: {})",
            img.width(),
            img.height(),
            format,
            quality
        );

        match format {
            OutputFormat::Jpeg => Self::encode_jpeg(img, quality),
            OutputFormat::Png => Self::encode_png(img, quality),
            OutputFormat::Webp => Self::encode_webp(img, quality),
        }
    }

    /// mozjpeg with optimized entropy coding. JPEG has no alpha, so any
    /// non-RGB8 buffer is flattened to three channels first.
    fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        use mozjpeg::{ColorSpace, Compress, ScanMode};

        let rgb_img = img.to_rgb8();
        let width = rgb_img.width() as usize;
        let height = rgb_img.height() as usize;

        let mut comp = Compress::new(ColorSpace::JCS_RGB);
        comp.set_size(width, height);
        comp.set_quality(quality as f32);
        comp.set_scan_optimization_mode(ScanMode::AllComponentsTogether);
        comp.set_optimize_coding(true);

        let mut comp = comp
            .start_compress(Vec::new())
            .map_err(|e| Error::Encode(format!("JPEG compression failed: {}", e)))?;

        comp.write_scanlines(rgb_img.as_raw())
            .map_err(|e| Error::Encode(format!("JPEG write failed: {}", e)))?;

        comp.finish()
            .map_err(|e| Error::Encode(format!("JPEG finish failed: {}", e)))
    }

    /// PNG is lossless; quality maps to an oxipng effort preset (0-6).
    fn encode_png(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let level = ((quality as f32 / 100.0) * 6.0) as u8;
        tracing::debug!("PNG optimization level: {}", level);

        // First encode with image crate, then shrink with oxipng
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        img.write_to(&mut cursor, image::ImageFormat::Png)?;

        let options = oxipng::Options::from_preset(level);
        oxipng::optimize_from_memory(&buffer, &options)
            .map_err(|e| Error::Encode(format!("PNG optimization failed: {}", e)))
    }

    /// WebP keeps the alpha channel when the source carries one
    fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let quality = quality as f32;

        let webp_data = if img.color().has_alpha() {
            let rgba_img = img.to_rgba8();
            webp::Encoder::from_rgba(rgba_img.as_raw(), rgba_img.width(), rgba_img.height())
                .encode(quality)
        } else {
            let rgb_img = img.to_rgb8();
            webp::Encoder::from_rgb(rgb_img.as_raw(), rgb_img.width(), rgb_img.height())
                .encode(quality)
        };

        Ok(webp_data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let mut img = DynamicImage::new_rgb8(width, height);
        let rgb_img = img.as_mut_rgb8().unwrap();
        for (x, y, pixel) in rgb_img.enumerate_pixels_mut() {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            let b = (((x + y) as f32 / (width + height) as f32) * 255.0) as u8;
            *pixel = image::Rgb([r, g, b]);
        }
        img
    }

    #[test]
    fn test_jpeg_quality_ordering() {
        let img = gradient_image(640, 480);

        let high = ImageEncoder::encode(&img, OutputFormat::Jpeg, 95).unwrap();
        let low = ImageEncoder::encode(&img, OutputFormat::Jpeg, 30).unwrap();

        assert!(
            low.len() <= high.len(),
            "Low quality ({} bytes) should not exceed high quality ({} bytes)",
            low.len(),
            high.len()
        );
    }

    #[test]
    fn test_jpeg_flattens_alpha() {
        let img = DynamicImage::new_rgba8(64, 64);
        let data = ImageEncoder::encode(&img, OutputFormat::Jpeg, 80).unwrap();

        let decoded = image::load_from_memory(&data).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let img = gradient_image(100, 100);
        let data = ImageEncoder::encode(&img, OutputFormat::Png, 100).unwrap();

        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.dimensions(), img.dimensions());
        assert_eq!(decoded.to_rgb8().as_raw(), img.to_rgb8().as_raw());
    }

    #[test]
    fn test_webp_output_decodes_as_webp() {
        let img = gradient_image(80, 60);
        let data = ImageEncoder::encode(&img, OutputFormat::Webp, 80).unwrap();

        let format = image::guess_format(&data).unwrap();
        assert_eq!(format, image::ImageFormat::WebP);
    }

    #[test]
    fn test_webp_preserves_alpha() {
        let img = DynamicImage::new_rgba8(32, 32);
        let data = ImageEncoder::encode(&img, OutputFormat::Webp, 80).unwrap();

        let decoded = image::load_from_memory(&data).unwrap();
        assert!(decoded.color().has_alpha());
    }
}
