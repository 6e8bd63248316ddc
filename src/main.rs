//! Account service binary
//!
//! Reads configuration from `ACCOUNT_SERVICE_CONFIG` or
//! `~/.config/account-service/config.toml`.

use std::path::PathBuf;

use tracing::{error, info};

use account_service::config::{default_config_path, AppConfig};
use account_service::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("ACCOUNT_SERVICE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let loaded = AppConfig::load(&config_path);
    let config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: true,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully");
    handle.shutdown_signal().wait().await;

    handle.wait().await;
    Ok(())
}
