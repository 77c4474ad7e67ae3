//! GyroLaser session registry server
//!
//! Entry point: loads configuration, sets up logging and serves the API.

use std::sync::Arc;

use dotenvy::dotenv;
use gyrolaser_server::{config::AppConfig, server, telemetry};
use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init(config.log.format);

    server::start_server(config).await
}
