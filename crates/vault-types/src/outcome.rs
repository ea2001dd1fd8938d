//! # Event Outcomes
//!
//! What the host must do after a handler ran: whether to suppress the
//! interaction and which message, if any, to show the acting player.

use crate::entities::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys of the localized messages the mediator can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// The item is on the content blacklist.
    BlacklistedItem,
    /// The player may not take from this vault tier.
    TakeNoPermission,
    /// The player may not add to this vault tier.
    AddNoPermission,
    /// The player's vaults have not finished loading.
    PlayerNotLoaded,
}

impl MessageKey {
    /// All keys, in catalog order.
    pub const ALL: [MessageKey; 4] = [
        MessageKey::BlacklistedItem,
        MessageKey::TakeNoPermission,
        MessageKey::AddNoPermission,
        MessageKey::PlayerNotLoaded,
    ];

    /// Catalog key as used in message files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlacklistedItem => "blacklisted-item",
            Self::TakeNoPermission => "take-no-permission",
            Self::AddNoPermission => "add-no-permission",
            Self::PlayerNotLoaded => "player-not-loaded",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered message addressed to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Recipient.
    pub player: PlayerId,
    /// Which message this is.
    pub key: MessageKey,
    /// Rendered text.
    pub text: String,
}

/// The host-facing result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Suppress the interaction's UI effect.
    pub cancelled: bool,
    /// At most one message for the acting player.
    pub notice: Option<Notice>,
}

impl Outcome {
    /// Let the interaction take effect.
    #[must_use]
    pub fn proceed() -> Self {
        Self {
            cancelled: false,
            notice: None,
        }
    }

    /// Suppress without telling anyone.
    #[must_use]
    pub fn suppress() -> Self {
        Self {
            cancelled: true,
            notice: None,
        }
    }

    /// Suppress and send exactly one message.
    #[must_use]
    pub fn denied(notice: Notice) -> Self {
        Self {
            cancelled: true,
            notice: Some(notice),
        }
    }

    /// Whether the host should let the interaction through.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        !self.cancelled
    }
}
