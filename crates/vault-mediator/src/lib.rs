//! # Vault Mediator
//!
//! Enforces tiered access to per-player storage vaults and manages the
//! session lifecycle that loads and saves them.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `VaultRegistry`: live container to vault and owner index
//!   - `classify_click` / `classify_drag` / `classify_transfer`: intent
//!   - `PolicyEnforcer`: blacklist and `vault.{order}.{take|add}` checks
//!   - `MediatorConfig`: configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `InteractionHandler`: Driving port (host events)
//!   - `VaultPersister`, `PermissionSource`, `ConfigSource`,
//!     `MessageCatalog`, `SelectorLauncher`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `SessionLifecycleManager`: delayed loads, saves, stale-result handling
//!   - `InteractionMediator`: implements `InteractionHandler`
//!
//! - **Adapters Layer** (`adapters/`): In-memory and file-backed ports
//!
//! ## Threading
//!
//! All registry and session state is owned by a single dispatcher that
//! takes `&mut self`. Timers and persistence run as tokio tasks and report
//! back through `SessionSignal`s on an mpsc channel.
//!
//! ## Usage Example
//!
//! ```ignore
//! use vault_mediator::{adapters::*, InteractionHandler, InteractionMediator, MediatorPorts};
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut mediator = InteractionMediator::new(config, ports, tx)?;
//!
//! mediator.on_connect(player)?;
//! while let Some(signal) = rx.recv().await {
//!     mediator.on_signal(signal)?;
//! }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    Intent, MediatorConfig, SessionPhase, SessionSignal, Vault, VaultMetadata, VaultRegistry,
    VaultSet,
};
pub use error::{ConfigError, MediatorError, PersistenceError, PolicyError, RegistryError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{
    ConfigSource, InteractionHandler, MessageCatalog, PermissionSource, SelectorLauncher,
    VaultPersister,
};
pub use service::{InteractionMediator, MediatorPorts, SessionLifecycleManager, FIRST_SELECTOR_PAGE};
