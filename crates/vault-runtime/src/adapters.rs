//! # Bus Adapters
//!
//! Port implementations that talk to the host binding over the event bus.

use std::sync::Arc;
use tracing::{debug, warn};
use vault_bus::{BusEvent, EventPublisher};
use vault_mediator::SelectorLauncher;
use vault_types::PlayerId;

/// Selector launcher that asks the host binding to open the menu.
pub struct BusSelectorLauncher {
    event_bus: Arc<dyn EventPublisher>,
}

impl BusSelectorLauncher {
    pub fn new(event_bus: Arc<dyn EventPublisher>) -> Self {
        Self { event_bus }
    }
}

impl SelectorLauncher for BusSelectorLauncher {
    fn launch_for(&self, player: PlayerId, page: u32) {
        let receivers = self
            .event_bus
            .publish(BusEvent::SelectorRequested { player, page });

        if receivers == 0 {
            warn!(player = %player, "No host binding subscribed for selector requests");
        } else {
            debug!(player = %player, page, "Selector request published");
        }
    }
}
