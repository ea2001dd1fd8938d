//! Policy enforcement
//!
//! Decides whether an interaction with a vault may take effect. Two rules
//! apply independently and the first deny wins:
//!
//! 1. **Blacklist**: a blacklisted item may not be moved in a vault unless
//!    the player can bypass the blacklist.
//! 2. **Tier permission**: taking from or adding to a vault needs the
//!    capability `vault.<order>.take` or `vault.<order>.add`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vault_types::{ItemStack, ItemType, MessageKey, PlayerId};

use super::classifier::Intent;
use super::config::BlacklistConfig;
use super::vault::Vault;
use crate::error::PolicyError;
use crate::ports::outbound::PermissionSource;

/// Why an interaction was denied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    BlacklistedItem,
    NoPermission(Intent),
}

impl DenyReason {
    /// Message shown to the player for this denial.
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::BlacklistedItem => MessageKey::BlacklistedItem,
            Self::NoPermission(Intent::Add) => MessageKey::AddNoPermission,
            Self::NoPermission(_) => MessageKey::TakeNoPermission,
        }
    }
}

/// Policy decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Content blacklist
#[derive(Clone, Debug, Default)]
pub struct Blacklist {
    enabled: bool,
    items: HashSet<ItemType>,
}

impl Blacklist {
    pub fn new(enabled: bool, items: impl IntoIterator<Item = ItemType>) -> Self {
        Self {
            enabled,
            items: items.into_iter().collect(),
        }
    }

    pub fn from_config(config: &BlacklistConfig) -> Self {
        Self::new(config.enabled, config.items.iter().cloned())
    }

    /// Whether `item` is present, non-empty and blacklisted while the
    /// blacklist is enabled.
    pub fn blocks(&self, item: Option<&ItemStack>) -> bool {
        self.enabled
            && item.is_some_and(|item| !item.is_empty() && self.items.contains(&item.item_type))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Capability string for acting on a vault tier.
pub fn capability(order: &str, intent: Intent) -> Option<String> {
    intent
        .capability_suffix()
        .map(|suffix| format!("vault.{order}.{suffix}"))
}

/// Policy enforcer
///
/// Only ever asked about containers the registry resolved to a vault.
pub struct PolicyEnforcer {
    blacklist: Blacklist,
}

impl PolicyEnforcer {
    pub fn new(blacklist: Blacklist) -> Self {
        Self { blacklist }
    }

    /// Swap the blacklist (config reload).
    pub fn set_blacklist(&mut self, blacklist: Blacklist) {
        self.blacklist = blacklist;
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Decide a player interaction with `vault`.
    ///
    /// # Errors
    ///
    /// `MissingOrder` when a tier check is needed and the vault has no
    /// readable order.
    pub fn decide(
        &self,
        permissions: &dyn PermissionSource,
        player: PlayerId,
        vault: &Vault,
        intent: Intent,
        item: Option<&ItemStack>,
    ) -> Result<Decision, PolicyError> {
        if self.blacklist.blocks(item) && !permissions.can_bypass_blacklist(player) {
            return Ok(Decision::Deny(DenyReason::BlacklistedItem));
        }

        if intent == Intent::Neutral {
            return Ok(Decision::Allow);
        }

        let order = vault
            .order()
            .ok_or(PolicyError::MissingOrder { vault: vault.id() })?;

        match capability(&order, intent) {
            Some(cap) if !permissions.has_capability(player, &cap) => {
                Ok(Decision::Deny(DenyReason::NoPermission(intent)))
            }
            _ => Ok(Decision::Allow),
        }
    }

    /// Decide a container-to-container transfer into a vault.
    ///
    /// There is no acting player, so only the blacklist applies and the
    /// bypass is not consulted.
    pub fn decide_transfer(&self, item: &ItemStack) -> Decision {
        if self.blacklist.blocks(Some(item)) {
            Decision::Deny(DenyReason::BlacklistedItem)
        } else {
            Decision::Allow
        }
    }
}
