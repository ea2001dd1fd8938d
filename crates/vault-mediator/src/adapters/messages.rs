//! Static message catalog
//!
//! English defaults, overridable per key. Text uses `&` colour codes which
//! are translated to the host's `§` form when rendered.

use std::collections::HashMap;
use vault_types::MessageKey;

use crate::error::ConfigError;
use crate::ports::{ConfigSource, MessageCatalog};

/// Config table holding message overrides, e.g. `messages.blacklisted-item`.
pub const MESSAGES_SECTION: &str = "messages";

const COLOUR_CHAR: char = '§';
const ALT_COLOUR_CHAR: char = '&';
const COLOUR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

fn default_text(key: MessageKey) -> &'static str {
    match key {
        MessageKey::BlacklistedItem => "&cYou cannot move that item in or out of a vault.",
        MessageKey::TakeNoPermission => "&cYou may only take items out of this vault.",
        MessageKey::AddNoPermission => "&cYou may only put items into this vault.",
        MessageKey::PlayerNotLoaded => "&cYour vaults are still loading, please wait.",
    }
}

/// Replace `&x` colour codes with `§x`. Other ampersands are kept.
pub fn translate_colour_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ALT_COLOUR_CHAR && chars.peek().is_some_and(|n| COLOUR_CODES.contains(*n)) {
            out.push(COLOUR_CHAR);
        } else {
            out.push(c);
        }
    }
    out
}

/// Message catalog with English defaults
#[derive(Debug, Clone, Default)]
pub struct StaticMessageCatalog {
    overrides: HashMap<MessageKey, String>,
}

impl StaticMessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to replace one message.
    pub fn with_override(mut self, key: MessageKey, text: impl Into<String>) -> Self {
        self.overrides.insert(key, text.into());
        self
    }

    /// Read overrides from `messages.<key>` entries; absent keys keep the
    /// English default.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for key in MessageKey::ALL {
            let path = format!("{MESSAGES_SECTION}.{}", key.as_str());
            if let Some(text) = source.get_string(&path)? {
                catalog.overrides.insert(key, text);
            }
        }
        Ok(catalog)
    }
}

impl MessageCatalog for StaticMessageCatalog {
    fn get(&self, key: MessageKey) -> String {
        let raw = self
            .overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| default_text(key));
        translate_colour_codes(raw)
    }
}
