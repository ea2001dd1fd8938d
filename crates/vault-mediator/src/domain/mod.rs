//! Domain layer for the vault mediator
//!
//! Pure logic: the vault registry, action classification, policy and the
//! lifecycle vocabulary. No I/O and no timers live here.

pub mod classifier;
pub mod config;
pub mod policy;
pub mod registry;
pub mod session;
pub mod vault;

pub use classifier::{
    classify_click, classify_drag, classify_transfer, subject_item, swap_counterpart, Intent,
};
pub use config::{
    BlacklistConfig, MediatorConfig, DEFAULT_LOAD_DELAY_TICKS, KEY_BLACKLIST_ENABLED,
    KEY_BLACKLIST_ITEMS, KEY_LOAD_DELAY, KEY_REPLACE_WITH_SELECTOR, MAX_LOAD_DELAY_TICKS, TICK,
};
pub use policy::{capability, Blacklist, Decision, DenyReason, PolicyEnforcer};
pub use registry::VaultRegistry;
pub use session::{LoadTicket, SessionPhase, SessionSignal};
pub use vault::{vault_set, MetadataValue, Vault, VaultMetadata, VaultSet, ORDER_KEY};
