//! In-memory capability store

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use vault_types::PlayerId;

use crate::ports::PermissionSource;

/// Permission source backed by in-memory grant sets
///
/// A capability held as a default applies to every player.
#[derive(Debug, Default)]
pub struct InMemoryPermissions {
    grants: RwLock<HashMap<PlayerId, HashSet<String>>>,
    defaults: RwLock<HashSet<String>>,
    bypass: RwLock<HashSet<PlayerId>>,
}

impl InMemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, player: PlayerId, capability: &str) {
        self.grants
            .write()
            .entry(player)
            .or_default()
            .insert(capability.to_string());
    }

    pub fn revoke(&self, player: PlayerId, capability: &str) {
        let mut grants = self.grants.write();
        if let Some(held) = grants.get_mut(&player) {
            held.remove(capability);
            if held.is_empty() {
                grants.remove(&player);
            }
        }
    }

    /// Grant a capability to everyone.
    pub fn grant_default(&self, capability: &str) {
        self.defaults.write().insert(capability.to_string());
    }

    pub fn allow_bypass(&self, player: PlayerId) {
        self.bypass.write().insert(player);
    }

    pub fn deny_bypass(&self, player: PlayerId) {
        self.bypass.write().remove(&player);
    }
}

impl PermissionSource for InMemoryPermissions {
    fn has_capability(&self, player: PlayerId, capability: &str) -> bool {
        if self.defaults.read().contains(capability) {
            return true;
        }
        self.grants
            .read()
            .get(&player)
            .is_some_and(|held| held.contains(capability))
    }

    fn can_bypass_blacklist(&self, player: PlayerId) -> bool {
        self.bypass.read().contains(&player)
    }
}
