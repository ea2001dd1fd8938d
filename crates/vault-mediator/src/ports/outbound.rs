//! Outbound Ports (Driven Ports)
//!
//! Everything the mediator consumes from its host: storage, permissions,
//! configuration, localized messages and the selector menu.

use async_trait::async_trait;
use vault_types::{MessageKey, PlayerId};

use crate::domain::VaultSet;
use crate::error::{ConfigError, PersistenceError};

/// Vault storage (Driven Port)
///
/// Called only from worker tasks, never from the dispatch thread.
#[async_trait]
pub trait VaultPersister: Send + Sync {
    /// Load a player's vault set. A player with no stored data gets an
    /// empty set.
    async fn load(&self, player: PlayerId) -> Result<VaultSet, PersistenceError>;

    /// Persist a player's vault set.
    async fn save(&self, player: PlayerId, vaults: VaultSet) -> Result<(), PersistenceError>;
}

/// Capability lookups (Driven Port)
pub trait PermissionSource: Send + Sync {
    /// Whether the player holds a capability such as `vault.2.take`.
    fn has_capability(&self, player: PlayerId, capability: &str) -> bool;

    /// Whether the player may move blacklisted items.
    fn can_bypass_blacklist(&self, player: PlayerId) -> bool;
}

/// Read-only configuration lookups by dotted key (Driven Port)
///
/// `Ok(None)` means the key is absent; a present key of the wrong type is
/// an error.
pub trait ConfigSource: Send + Sync {
    fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError>;

    fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError>;

    fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError>;

    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError>;
}

/// Localized messages (Driven Port)
pub trait MessageCatalog: Send + Sync {
    /// Rendered text for a message key.
    fn get(&self, key: MessageKey) -> String;
}

/// Vault selector menu (Driven Port)
pub trait SelectorLauncher: Send + Sync {
    /// Open the selector for a player at a 1-based page.
    fn launch_for(&self, player: PlayerId, page: u32);
}
