use image::imageops::FilterType;
use smolimg_codec::{ImageDecoder, ImageEncoder};
use smolimg_common::{Error, OutputFormat, Result};

/// Parameters applied uniformly to every image in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformRequest {
    /// Encoding quality, 1-100
    pub quality: u8,

    /// Target output format
    pub format: OutputFormat,

    /// Resize percentage, 10-100. 100 means no resize.
    pub resize_factor: u8,
}

impl TransformRequest {
    /// Build a request with out-of-range values clamped to valid bounds
    pub fn new(quality: u8, format: OutputFormat, resize_factor: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            format,
            resize_factor: resize_factor.clamp(10, 100),
        }
    }
}

impl Default for TransformRequest {
    fn default() -> Self {
        Self {
            quality: 80,
            format: OutputFormat::Webp,
            resize_factor: 100,
        }
    }
}

/// Outcome of one successful transform. Immutable once computed.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Input size in bytes
    pub original_size: usize,

    /// Encoded output size in bytes
    pub compressed_size: usize,

    /// Size reduction percentage, rounded to one decimal
    pub savings_pct: f64,

    /// Encoded output bytes
    pub data: Vec<u8>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

/// Transform one image: decode, normalize orientation, resize, re-encode.
///
/// The whole routine is a single pass over one in-memory buffer; nothing is
/// retained after the result is returned.
pub fn transform(bytes: &[u8], request: &TransformRequest) -> Result<TransformResult> {
    let original_size = bytes.len();

    let (img, info) = ImageDecoder::decode(bytes)?;

    tracing::info!(
        "Transforming {}x{} {:?} -> {} (quality {}, resize {}%)",
        info.width,
        info.height,
        info.color_type,
        request.format,
        request.quality,
        request.resize_factor
    );

    let img = apply_resize(img, request.resize_factor)?;

    let data = ImageEncoder::encode(&img, request.format, request.quality)?;
    let compressed_size = data.len();

    Ok(TransformResult {
        original_size,
        compressed_size,
        savings_pct: savings_pct(original_size, compressed_size),
        data,
        mime_type: request.format.mime_type(),
    })
}

/// Scale both axes to floor(dim * factor / 100) with Lanczos resampling.
/// Factor 100 is a no-op and returns the buffer untouched.
fn apply_resize(img: image::DynamicImage, factor: u8) -> Result<image::DynamicImage> {
    if factor >= 100 {
        return Ok(img);
    }

    let new_width = img.width() * factor as u32 / 100;
    let new_height = img.height() * factor as u32 / 100;

    if new_width == 0 || new_height == 0 {
        return Err(Error::InvalidParameter(format!(
            "Resize to {}% collapses {}x{} to zero pixels",
            factor,
            img.width(),
            img.height()
        )));
    }

    tracing::debug!(
        "Resizing {}x{} -> {}x{}",
        img.width(),
        img.height(),
        new_width,
        new_height
    );

    Ok(img.resize_exact(new_width, new_height, FilterType::Lanczos3))
}

/// Size reduction as a percentage, rounded to one decimal.
/// A zero-byte original reports zero savings instead of dividing by zero.
pub fn savings_pct(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }

    let pct = (1.0 - compressed as f64 / original as f64) * 100.0;
    (pct * 10.0).round() / 10.0
}
