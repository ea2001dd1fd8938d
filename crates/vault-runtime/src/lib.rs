//! # Vault Runtime
//!
//! Hosts the vault mediator behind the host ingress and the event bus.
//!
//! ```text
//! Host Binding ──HostEnvelope{id, event}──→ Ingress ──→ Dispatcher ──→ InteractionMediator
//!      ↑                                                    │                 │
//!      │                                                    │        timers / workers
//!      │                                                    │                 │
//!      └──── Event Bus ◄── Outcome{id} / SelectorRequested ─┘ ←── SessionSignal
//! ```
//!
//! ## Modules
//!
//! - `config/` - environment settings and the mediator config file
//! - `adapters/` - bus-backed selector launcher
//! - `dispatcher/` - the single task that owns the mediator
//! - `runtime/` - wiring, startup and graceful shutdown

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod config;
pub mod dispatcher;
pub mod runtime;

pub use adapters::BusSelectorLauncher;
pub use config::{MediatorSettings, RuntimeConfig};
pub use dispatcher::{Control, DispatchSummary, Dispatcher};
pub use runtime::{RuntimeError, VaultRuntime};
