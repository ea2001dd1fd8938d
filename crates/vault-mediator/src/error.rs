//! Error types for the vault mediator
//!
//! Policy denials are not errors; they are reported through
//! [`vault_types::Outcome`]. Everything here is either a consistency
//! violation, a persistence failure or a configuration problem.

use thiserror::Error;
use vault_types::{ContainerHandle, PlayerId, VaultId};

/// Errors from the vault registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Vaults for player {player} are already registered")]
    AlreadyRegistered { player: PlayerId },

    #[error("Container {container} already belongs to player {owner}")]
    ContainerInUse {
        container: ContainerHandle,
        owner: PlayerId,
    },
}

/// Errors from policy evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Vault {vault} has no readable order")]
    MissingOrder { vault: VaultId },
}

/// Errors from vault persistence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {error}")]
    Io { path: String, error: String },

    #[error("Corrupt vault data for player {player}: {reason}")]
    Corrupt { player: PlayerId, reason: String },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Persistence worker failed: {0}")]
    WorkerFailed(String),
}

/// Errors from configuration loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Config key {key} must be {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Top-level mediator errors
///
/// Every variant except `Config` and `ShuttingDown` is a consistency
/// violation: event processing is aborted and the host fails closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediatorError {
    #[error("Container {container} is a vault but does not belong to player {player}")]
    UnresolvedVault {
        player: PlayerId,
        container: ContainerHandle,
    },

    #[error("Player {player} connected twice without disconnecting")]
    DuplicateConnect { player: PlayerId },

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mediator is shutting down")]
    ShuttingDown,
}

impl MediatorError {
    /// Whether this error means the mediator's view of the world is inconsistent.
    #[must_use]
    pub fn is_consistency_violation(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::ShuttingDown)
    }
}
