//! # Vault Runtime
//!
//! Standalone entry point: reads the environment, starts the dispatcher on
//! a fresh event bus and runs until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vault_bus::InMemoryEventBus;
use vault_runtime::{RuntimeConfig, VaultRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = RuntimeConfig::from_env();
    info!(
        config = ?config.config_path,
        data_dir = ?config.data_dir,
        bus_capacity = config.bus_capacity,
        "Starting vault runtime"
    );

    let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
    let runtime = VaultRuntime::from_config(&config, bus, None)
        .context("Failed to start vault runtime")?;

    info!("Vault runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    let summary = runtime.shutdown().await?;
    info!(
        events = summary.events_handled,
        saves = summary.saves_on_shutdown,
        drained = summary.drained,
        "Shutdown complete"
    );
    Ok(())
}
