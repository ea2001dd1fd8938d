//! Vault registry
//!
//! Maps each loaded player to their vault set and resolves live containers
//! back to the vault they render. An entry exists iff the player's vaults
//! are loaded and not yet unloaded.

use std::collections::HashMap;
use vault_types::{ContainerHandle, PlayerId};

use super::vault::{Vault, VaultSet};
use crate::error::RegistryError;

/// Registry of loaded vault sets
#[derive(Debug, Default)]
pub struct VaultRegistry {
    vaults: HashMap<PlayerId, VaultSet>,
    /// Reverse index: container -> owning player
    owners: HashMap<ContainerHandle, PlayerId>,
}

impl VaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly loaded vault set.
    ///
    /// Fails on double-load, and when any container is already owned by
    /// another loaded vault.
    pub fn register(&mut self, player: PlayerId, vaults: VaultSet) -> Result<(), RegistryError> {
        if self.vaults.contains_key(&player) {
            return Err(RegistryError::AlreadyRegistered { player });
        }

        if let Some((container, owner)) = vaults
            .values()
            .find_map(|v| self.owners.get(&v.container()).map(|o| (v.container(), *o)))
        {
            return Err(RegistryError::ContainerInUse { container, owner });
        }

        for vault in vaults.values() {
            self.owners.insert(vault.container(), player);
        }
        self.vaults.insert(player, vaults);
        Ok(())
    }

    /// Remove and return a player's vault set.
    pub fn unregister(&mut self, player: PlayerId) -> Option<VaultSet> {
        let vaults = self.vaults.remove(&player)?;
        for vault in vaults.values() {
            self.owners.remove(&vault.container());
        }
        Some(vaults)
    }

    /// Whether `container` is any loaded vault of any player.
    pub fn is_vault(&self, container: ContainerHandle) -> bool {
        self.owners.contains_key(&container)
    }

    /// The player's vault rendered by `container`, if any.
    pub fn resolve(&self, player: PlayerId, container: ContainerHandle) -> Option<&Vault> {
        self.vaults
            .get(&player)?
            .values()
            .find(|vault| vault.matches_container(container))
    }

    /// Owner of a vault container.
    pub fn owner_of(&self, container: ContainerHandle) -> Option<PlayerId> {
        self.owners.get(&container).copied()
    }

    /// Querying an absent player is "not loaded", never an error.
    pub fn is_loaded(&self, player: PlayerId) -> bool {
        self.vaults.contains_key(&player)
    }

    pub fn vaults(&self, player: PlayerId) -> Option<&VaultSet> {
        self.vaults.get(&player)
    }

    pub fn loaded_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.vaults.keys().copied()
    }

    /// Number of loaded players.
    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }
}
