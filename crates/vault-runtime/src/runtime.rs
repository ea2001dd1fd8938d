//! # Vault Runtime
//!
//! Builds the mediator's ports, opens the host ingress and runs the
//! dispatcher on its own task.
//!
//! ## Startup Sequence
//!
//! 1. Read mediator settings (TOML) and runtime settings (env)
//! 2. Choose the persister: file-backed with a data dir, in-memory otherwise
//! 3. Open the host ingress
//! 4. Spawn the dispatcher
//!
//! ## Shutdown Sequence
//!
//! 1. Signal the dispatcher
//! 2. Answer host events already submitted, then close the ingress
//! 3. Cancel pending loads and save every loaded player
//! 4. Wait for saves up to the grace period

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;
use vault_bus::{host_ingress, EventPublisher, HostIngress, InMemoryEventBus};
use vault_mediator::adapters::{FileVaultPersister, InMemoryPermissions, InMemoryVaultPersister};
use vault_mediator::{
    ConfigError, InteractionMediator, MediatorConfig, MediatorPorts, Metrics, PermissionSource,
    VaultPersister,
};

use crate::adapters::BusSelectorLauncher;
use crate::config::{MediatorSettings, RuntimeConfig};
use crate::dispatcher::{Control, DispatchSummary, Dispatcher};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Dispatcher is no longer running")]
    DispatcherGone,

    #[error("Dispatcher task failed: {0}")]
    DispatcherFailed(String),
}

/// A running dispatcher and the handles to steer it.
pub struct VaultRuntime {
    bus: Arc<InMemoryEventBus>,
    ingress: HostIngress,
    metrics: Arc<Metrics>,
    control: mpsc::UnboundedSender<Control>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<DispatchSummary>,
}

impl VaultRuntime {
    /// Start a dispatcher over explicit ports.
    ///
    /// Host events go in through [`VaultRuntime::ingress`]; outcomes and
    /// selector requests come back on `bus`.
    pub fn start(
        bus: Arc<InMemoryEventBus>,
        config: MediatorConfig,
        ports: MediatorPorts,
        shutdown_grace: Duration,
    ) -> Result<Self, RuntimeError> {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mediator = InteractionMediator::new(config, ports, signal_tx)?;
        let metrics = mediator.metrics();
        let (ingress, events) = host_ingress();
        let publisher: Arc<dyn EventPublisher> = bus.clone();

        let dispatcher = Dispatcher::new(
            mediator,
            events,
            signal_rx,
            control_rx,
            shutdown_rx,
            publisher,
            shutdown_grace,
        );
        let task = tokio::spawn(dispatcher.run());

        Ok(Self {
            bus,
            ingress,
            metrics,
            control: control_tx,
            shutdown: shutdown_tx,
            task,
        })
    }

    /// Start a dispatcher from runtime configuration.
    ///
    /// `permissions` is the host's capability lookup; when `None`, an
    /// in-memory source seeded with the configured default grants is used.
    pub fn from_config(
        config: &RuntimeConfig,
        bus: Arc<InMemoryEventBus>,
        permissions: Option<Arc<dyn PermissionSource>>,
    ) -> Result<Self, RuntimeError> {
        let settings = config.load_settings()?;

        let persister: Arc<dyn VaultPersister> = match &config.data_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Storing vaults on disk");
                Arc::new(FileVaultPersister::new(dir.clone()))
            }
            None => {
                info!("No data directory configured, vaults are kept in memory");
                Arc::new(InMemoryVaultPersister::new())
            }
        };

        let permissions = permissions.unwrap_or_else(|| default_permissions(&settings));
        let ports = MediatorPorts {
            persister,
            permissions,
            messages: Arc::new(settings.messages),
            selector: Arc::new(BusSelectorLauncher::new(bus.clone())),
        };

        Self::start(bus, settings.mediator, ports, config.shutdown_grace)
    }

    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    /// Handle for submitting host events to the dispatcher.
    pub fn ingress(&self) -> HostIngress {
        self.ingress.clone()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Ask the dispatcher to apply a new mediator configuration.
    pub fn reload(&self, config: MediatorConfig) -> Result<(), RuntimeError> {
        self.control
            .send(Control::Reload(config))
            .map_err(|_| RuntimeError::DispatcherGone)
    }

    /// Stop the dispatcher, letting it save loaded players first.
    pub async fn shutdown(self) -> Result<DispatchSummary, RuntimeError> {
        info!("Initiating graceful shutdown...");
        // A closed channel means the dispatcher already stopped on its own.
        let _ = self.shutdown.send(true);

        self.task
            .await
            .map_err(|e| RuntimeError::DispatcherFailed(e.to_string()))
    }
}

fn default_permissions(settings: &MediatorSettings) -> Arc<dyn PermissionSource> {
    let permissions = InMemoryPermissions::new();
    for capability in &settings.default_grants {
        permissions.grant_default(capability);
    }
    Arc::new(permissions)
}
