//! TOML configuration source
//!
//! # Config File Format
//!
//! ```toml
//! [storage]
//! load-delay = 100
//!
//! [enderchest]
//! replace-with-selector = true
//!
//! [vault.blacklist]
//! enabled = true
//! items = ["TNT", "BEDROCK"]
//!
//! [messages]
//! player-not-loaded = "&cStill loading"
//! ```
//!
//! Keys are looked up by dotted path, so `vault.blacklist.items` walks the
//! nested tables above.

use std::fs;
use std::path::Path;
use toml::{Table, Value};

use crate::error::ConfigError;
use crate::ports::ConfigSource;

/// Configuration source backed by a parsed TOML document
#[derive(Debug, Clone, Default)]
pub struct TomlConfigSource {
    root: Table,
}

impl TomlConfigSource {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let root: Table = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self { root })
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    fn mismatch(key: &str, expected: &'static str) -> ConfigError {
        ConfigError::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }
}

impl ConfigSource for TomlConfigSource {
    fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        self.lookup(key)
            .map(|v| v.as_integer().ok_or_else(|| Self::mismatch(key, "an integer")))
            .transpose()
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.lookup(key)
            .map(|v| v.as_bool().ok_or_else(|| Self::mismatch(key, "a boolean")))
            .transpose()
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.lookup(key)
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Self::mismatch(key, "a string"))
            })
            .transpose()
    }

    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(value) = self.lookup(key) else {
            return Ok(None);
        };
        let array = value
            .as_array()
            .ok_or_else(|| Self::mismatch(key, "a list of strings"))?;
        array
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Self::mismatch(key, "a list of strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
