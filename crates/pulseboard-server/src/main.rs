// Pulseboard Server
//
// Main server binary for the persona activity dashboard.

mod config;
mod lifecycle;
mod logging;

use anyhow::Result;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match config::ServerConfig::from_file("config.toml") {
        Ok(cfg) => cfg,
        Err(_) => {
            eprintln!("Warning: config.toml not found, using defaults");
            config::ServerConfig::default()
        }
    };

    // Initialize logging
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("Starting Pulseboard Server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: host={}, port={}, backend={}",
        config.server.host, config.server.port, config.storage.backend
    );

    let components = lifecycle::bootstrap(&config)?;

    lifecycle::run(&config, components).await
}
