use anyhow::Context;
use clap::Parser;
use smolimg_server::{router, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // Setup logging
    let log_level = if config.verbose {
        "smolimg=debug"
    } else {
        "smolimg=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let app = router(config.max_upload_bytes());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to address: {}", config.bind))?;

    let addr = listener
        .local_addr()
        .context("Failed to get local addr for API server")?;

    tracing::info!("smolimg API listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("API server exited with error")
}
