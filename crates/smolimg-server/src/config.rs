use clap::Parser;
use std::net::SocketAddr;

/// smolimg - local image compression API
#[derive(Parser, Debug)]
#[command(name = "smolimg-server")]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(short, long, env = "SMOLIMG_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Maximum upload body size in MiB
    #[arg(long, env = "SMOLIMG_MAX_UPLOAD_MB", default_value = "64")]
    pub max_upload_mb: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}
