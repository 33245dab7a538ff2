//! Inventory Sync - command-line client for the inventory backend
//!
//! # Usage
//!
//! ```bash
//! # Check the backend
//! INVENTORY_HOST=inventory.local INVENTORY_USERNAME=sync INVENTORY_PASSWORD=... \
//!     inventory-sync health
//!
//! # Stock levels for an export of storefront variants, one session for all lookups
//! inventory-sync --keep-alive inventory variants.json
//!
//! # Shipped shipments for an order
//! inventory-sync --config inventory.toml shipments order.json
//! ```
//!
//! # Environment Variables
//!
//! * `INVENTORY_HOST`, `INVENTORY_PORT` - Backend address (port defaults to 28192)
//! * `INVENTORY_USERNAME`, `INVENTORY_PASSWORD` - Session credentials
//! * `INVENTORY_LOCATION_GROUP` - Default location group for part and stock lookups
//! * `INVENTORY_MAX_RETRIES` - Retries for server-class failures (default: 1)
//! * `INVENTORY_REQUEST_TIMEOUT_MS` - Per-request timeout in milliseconds (default: 30000)
//! * `INVENTORY_LOG_LEVEL` - Log filter when `RUST_LOG` is unset (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_inventory::{SessionClient, SessionConfig};
use interface_cli::{commands, Cli};

fn main() -> Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config(cli.config.as_deref())?;
    tracing::info!(
        host = %config.host,
        port = config.effective_port(),
        configured = config.is_configured(),
        "Starting inventory sync"
    );

    let mut client = SessionClient::new(config);
    if cli.keep_alive {
        client.set_auto_close(false);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(&mut client, &cli.command, &mut out);
    client.disconnect();

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

/// Loads the session configuration from a file and/or the environment
fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => SessionConfig::from_env().context("loading configuration from environment"),
    }
}

/// Initializes the tracing subscriber; logs go to stderr so stdout stays JSON
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .init();
}
