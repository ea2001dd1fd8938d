//! # Runtime Configuration
//!
//! Process-level settings read from the environment. Mediator behaviour
//! itself (load delay, blacklist, messages) lives in the TOML file named by
//! `VAULT_CONFIG`.
//!
//! | Variable                    | Meaning                              | Default    |
//! |-----------------------------|--------------------------------------|------------|
//! | `VAULT_CONFIG`              | Path to the TOML config file         | none       |
//! | `VAULT_DATA_DIR`            | Directory for per-player vault files | in-memory  |
//! | `VAULT_BUS_CAPACITY`        | Event bus buffer per subscriber      | 1000       |
//! | `VAULT_SHUTDOWN_GRACE_SECS` | Time allowed to finish saves on exit | 10         |

use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use vault_bus::DEFAULT_CHANNEL_CAPACITY;
use vault_mediator::adapters::{StaticMessageCatalog, TomlConfigSource};
use vault_mediator::{ConfigError, ConfigSource, MediatorConfig};

pub const ENV_CONFIG: &str = "VAULT_CONFIG";
pub const ENV_DATA_DIR: &str = "VAULT_DATA_DIR";
pub const ENV_BUS_CAPACITY: &str = "VAULT_BUS_CAPACITY";
pub const ENV_SHUTDOWN_GRACE_SECS: &str = "VAULT_SHUTDOWN_GRACE_SECS";

/// Capabilities every player holds, e.g. `["vault.1.take", "vault.1.add"]`.
pub const KEY_DEFAULT_GRANTS: &str = "permissions.defaults";

/// Default time allowed for saves to finish on shutdown.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// TOML file holding the mediator settings.
    pub config_path: Option<PathBuf>,
    /// Directory for vault files; vaults are kept in memory when unset.
    pub data_dir: Option<PathBuf>,
    /// Event bus capacity.
    pub bus_capacity: usize,
    /// Time allowed for in-flight saves on shutdown.
    pub shutdown_grace: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            data_dir: None,
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable lookup. Unparseable values are
    /// logged and the default kept.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_CONFIG) {
            config.config_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(ENV_BUS_CAPACITY) {
            match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.bus_capacity = capacity,
                _ => warn!("{ENV_BUS_CAPACITY} must be a positive integer, got {raw:?}"),
            }
        }

        if let Some(raw) = lookup(ENV_SHUTDOWN_GRACE_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) => config.shutdown_grace = Duration::from_secs(secs),
                Err(_) => warn!("{ENV_SHUTDOWN_GRACE_SECS} must be whole seconds, got {raw:?}"),
            }
        }

        config
    }

    /// Read the mediator settings from the config file, or defaults when no
    /// file is configured.
    pub fn load_settings(&self) -> Result<MediatorSettings, ConfigError> {
        match &self.config_path {
            Some(path) => {
                info!(path = %path.display(), "Loading mediator configuration");
                MediatorSettings::from_source(&TomlConfigSource::load(path)?)
            }
            None => {
                info!("No {ENV_CONFIG} set, using default mediator configuration");
                Ok(MediatorSettings::default())
            }
        }
    }
}

/// Everything the runtime reads from the mediator config file.
#[derive(Debug, Clone, Default)]
pub struct MediatorSettings {
    pub mediator: MediatorConfig,
    pub messages: StaticMessageCatalog,
    pub default_grants: Vec<String>,
}

impl MediatorSettings {
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        Ok(Self {
            mediator: MediatorConfig::from_source(source)?,
            messages: StaticMessageCatalog::from_source(source)?,
            default_grants: source.get_string_list(KEY_DEFAULT_GRANTS)?.unwrap_or_default(),
        })
    }
}
