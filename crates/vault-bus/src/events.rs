//! # Bus Events
//!
//! Everything the dispatcher broadcasts back to host bindings: outcomes and
//! selector requests. Host events travel the lossless ingress instead.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vault_types::{Outcome, PlayerId};

/// All events that can be published to the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BusEvent {
    /// What the host must do for the host event with `correlation_id`.
    Outcome {
        /// Id of the host event this answers.
        correlation_id: Uuid,
        /// Player the outcome concerns, if any.
        player: Option<PlayerId>,
        /// The outcome.
        outcome: Outcome,
    },

    /// The host should open the vault selector menu for a player.
    SelectorRequested {
        /// Player to show the selector to.
        player: PlayerId,
        /// Page to open (1-based).
        page: u32,
    },
}

impl BusEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Outcome { .. } => EventTopic::Outcome,
            Self::SelectorRequested { .. } => EventTopic::Selector,
        }
    }

    /// The player this event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::Outcome { player, .. } => *player,
            Self::SelectorRequested { player, .. } => Some(*player),
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Outcomes published by the dispatcher.
    Outcome,
    /// Selector menu requests.
    Selector,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Players to include. Empty means all players (and player-less events).
    pub players: Vec<PlayerId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            players: Vec::new(),
        }
    }

    /// Create a filter for events concerning specific players.
    #[must_use]
    pub fn for_players(players: Vec<PlayerId>) -> Self {
        Self {
            topics: Vec::new(),
            players,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &BusEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let player_match = self.players.is_empty()
            || event
                .player()
                .is_some_and(|player| self.players.contains(&player));

        topic_match && player_match
    }
}
