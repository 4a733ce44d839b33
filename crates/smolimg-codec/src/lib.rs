pub mod decoder;
pub mod encoder;

pub use decoder::{ImageDecoder, ImageInfo};
pub use encoder::ImageEncoder;
