pub mod error;
pub mod format;
pub mod name;

pub use error::{Error, Result};
pub use format::OutputFormat;
pub use name::download_file_name;
