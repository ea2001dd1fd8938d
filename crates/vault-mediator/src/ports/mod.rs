//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - the host event handlers
//! - Driven Ports (outbound) - storage, permissions, config, messages, selector

pub mod inbound;
pub mod outbound;

pub use inbound::InteractionHandler;
pub use outbound::{ConfigSource, MessageCatalog, PermissionSource, SelectorLauncher, VaultPersister};
