use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder as _, ImageReader};
use smolimg_common::{Error, Result};
use std::io::Cursor;

/// Image properties captured during decoding
#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub color_type: image::ColorType,
    pub has_alpha: bool,
}

impl ImageInfo {
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn estimated_memory_mb(&self) -> f32 {
        let bytes = self.pixel_count() * self.color_type.bytes_per_pixel() as usize;
        bytes as f32 / (1024.0 * 1024.0)
    }
}

/// In-memory image decoder with EXIF orientation normalization
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode raw bytes into an upright pixel buffer.
    ///
    /// The container format is sniffed from the byte content, so the caller's
    /// filename is irrelevant. Camera orientation metadata is applied before
    /// returning, which means the reported dimensions are post-rotation.
    pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo)> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| Error::Decode(e.to_string()))?;

        let mut decoder = reader
            .into_decoder()
            .map_err(|e| Error::Decode(e.to_string()))?;

        // Orientation read must happen before the pixel data is consumed
        let orientation = decoder
            .orientation()
            .unwrap_or(Orientation::NoTransforms);

        let mut img =
            DynamicImage::from_decoder(decoder).map_err(|e| Error::Decode(e.to_string()))?;
        img.apply_orientation(orientation);

        let info = ImageInfo {
            width: img.width(),
            height: img.height(),
            color_type: img.color(),
            has_alpha: img.color().has_alpha(),
        };

        tracing::debug!(
            "Decoded {}x{} {:?} image ({:.2}MB in memory)",
            info.width,
            info.height,
            info.color_type,
            info.estimated_memory_mb()
        );

        Ok((img, info))
    }
}
