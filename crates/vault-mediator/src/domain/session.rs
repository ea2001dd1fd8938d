//! Session lifecycle vocabulary
//!
//! ```text
//! Disconnected ──connect──► PendingLoad ──timer──► Loading ──ok──► Loaded
//!      ▲                        │            │        │              │
//!      │                        │       (save in     └──err──► LoadFailed
//!      │                        │        flight)                     │
//!      │                        │            ▼                       │
//!      │                        │         Queued ──save done──► Loading
//!      └────────disconnect──────┴────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use vault_types::PlayerId;

use super::vault::VaultSet;
use crate::error::PersistenceError;

/// Identifies one scheduled load.
///
/// Every connect gets a fresh ticket, so timers and loads belonging to an
/// earlier connection can be told apart from current ones.
pub type LoadTicket = u64;

/// Externally visible lifecycle phase of a connected player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the load delay to elapse
    PendingLoad,
    /// Load is due but waits for the player's previous save
    Queued,
    /// Load is running on a worker
    Loading,
    /// Vaults are registered
    Loaded,
    /// Load failed; the player stays connected without vault access
    LoadFailed,
}

/// Messages delivered to the dispatch thread by timers and workers
#[derive(Debug)]
pub enum SessionSignal {
    /// A delayed load came due
    LoadDue { player: PlayerId, ticket: LoadTicket },

    /// A worker finished loading
    LoadFinished {
        player: PlayerId,
        ticket: LoadTicket,
        result: Result<VaultSet, PersistenceError>,
    },

    /// A worker finished saving
    SaveFinished {
        player: PlayerId,
        result: Result<(), PersistenceError>,
    },
}

impl SessionSignal {
    /// The player the signal concerns.
    pub fn player(&self) -> PlayerId {
        match self {
            Self::LoadDue { player, .. }
            | Self::LoadFinished { player, .. }
            | Self::SaveFinished { player, .. } => *player,
        }
    }
}
