//! Mediator configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use vault_mediator::domain::MediatorConfig;
//!
//! let config = MediatorConfig::default()
//!     .with_load_delay_ticks(40)
//!     .with_selector_replacement(true)
//!     .with_blacklist(vec![ItemType::parse("tnt")?]);
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vault_types::ItemType;

use crate::error::ConfigError;
use crate::ports::outbound::ConfigSource;

/// Host scheduler tick length.
pub const TICK: Duration = Duration::from_millis(50);

/// Delay before a connecting player's vaults are loaded, in ticks.
pub const KEY_LOAD_DELAY: &str = "storage.load-delay";
/// Whether right-clicking an ender chest opens the vault selector instead.
pub const KEY_REPLACE_WITH_SELECTOR: &str = "enderchest.replace-with-selector";
/// Whether the content blacklist is enforced.
pub const KEY_BLACKLIST_ENABLED: &str = "vault.blacklist.enabled";
/// Item types that may not be moved in vaults.
pub const KEY_BLACKLIST_ITEMS: &str = "vault.blacklist.items";

/// Default load delay: 5 seconds.
pub const DEFAULT_LOAD_DELAY_TICKS: u64 = 5 * 20;
/// Upper bound on the load delay: 10 minutes.
pub const MAX_LOAD_DELAY_TICKS: u64 = 10 * 60 * 20;

/// Content blacklist configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistConfig {
    pub enabled: bool,
    pub items: Vec<ItemType>,
}

/// Mediator configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediatorConfig {
    /// Delay between connect and load, in ticks
    pub load_delay_ticks: u64,
    /// Open the vault selector instead of the ender chest
    pub replace_with_selector: bool,
    /// Content blacklist
    pub blacklist: BlacklistConfig,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            load_delay_ticks: DEFAULT_LOAD_DELAY_TICKS,
            replace_with_selector: false,
            blacklist: BlacklistConfig::default(),
        }
    }
}

impl MediatorConfig {
    /// Read the configuration from a key-value source, defaulting absent keys.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let load_delay_ticks = match source.get_int(KEY_LOAD_DELAY)? {
            Some(ticks) => u64::try_from(ticks).map_err(|_| ConfigError::InvalidValue {
                key: KEY_LOAD_DELAY.to_string(),
                reason: format!("{ticks} is negative"),
            })?,
            None => defaults.load_delay_ticks,
        };

        let replace_with_selector = source
            .get_bool(KEY_REPLACE_WITH_SELECTOR)?
            .unwrap_or(defaults.replace_with_selector);

        let enabled = source
            .get_bool(KEY_BLACKLIST_ENABLED)?
            .unwrap_or(defaults.blacklist.enabled);

        let items = source
            .get_string_list(KEY_BLACKLIST_ITEMS)?
            .unwrap_or_default()
            .iter()
            .map(|raw| {
                ItemType::parse(raw).map_err(|e| ConfigError::InvalidValue {
                    key: KEY_BLACKLIST_ITEMS.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self {
            load_delay_ticks,
            replace_with_selector,
            blacklist: BlacklistConfig { enabled, items },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_delay_ticks > MAX_LOAD_DELAY_TICKS {
            return Err(ConfigError::InvalidValue {
                key: KEY_LOAD_DELAY.to_string(),
                reason: format!(
                    "{} ticks exceeds the maximum of {MAX_LOAD_DELAY_TICKS}",
                    self.load_delay_ticks
                ),
            });
        }
        Ok(())
    }

    /// Load delay as wall-clock time
    pub fn load_delay(&self) -> Duration {
        // Bounded by MAX_LOAD_DELAY_TICKS after validation, saturate otherwise
        TICK.saturating_mul(u32::try_from(self.load_delay_ticks).unwrap_or(u32::MAX))
    }

    /// Builder-style method to set the load delay
    pub fn with_load_delay_ticks(mut self, ticks: u64) -> Self {
        self.load_delay_ticks = ticks;
        self
    }

    /// Builder-style method to toggle the ender chest replacement
    pub fn with_selector_replacement(mut self, enabled: bool) -> Self {
        self.replace_with_selector = enabled;
        self
    }

    /// Builder-style method to enable the blacklist with the given items
    pub fn with_blacklist(mut self, items: Vec<ItemType>) -> Self {
        self.blacklist = BlacklistConfig {
            enabled: true,
            items,
        };
        self
    }
}
