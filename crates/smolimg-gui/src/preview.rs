use egui::ColorImage;

/// Largest preview edge; result cards never need more pixels than this
pub const MAX_PREVIEW_DIM: u32 = 512;

/// Decode an encoded output buffer into a preview-sized egui image.
///
/// The preview shows the actual compressed bytes, not the source, so what
/// the user sees is what the download contains. Returns None if the encoded
/// buffer cannot be decoded (the card then renders without a thumbnail).
pub fn preview_from_encoded(data: &[u8]) -> Option<ColorImage> {
    let img = image::load_from_memory(data).ok()?;

    let img = if img.width() > MAX_PREVIEW_DIM || img.height() > MAX_PREVIEW_DIM {
        img.thumbnail(MAX_PREVIEW_DIM, MAX_PREVIEW_DIM)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
