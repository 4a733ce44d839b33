use crate::OutputFormat;
use std::path::Path;

/// Build the download filename for a compressed image.
/// Format: compressed_<original-stem>.<ext>
pub fn download_file_name(original: &str, format: OutputFormat) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original);

    format!("compressed_{}.{}", stem, format.extension())
}
