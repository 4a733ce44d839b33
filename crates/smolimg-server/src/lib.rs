pub mod config;
pub mod routes;

pub use config::ServerConfig;
pub use routes::{router, CompressResponse, CompressedFile, FailedFile, SERVICE_NAME};
