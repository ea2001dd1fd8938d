//! Inbound Ports (Driving Ports)
//!
//! The API the host binding drives. Every handler runs on the dispatch
//! thread, returns immediately and may schedule asynchronous work.

use vault_types::{ClickEvent, DragEvent, HostEvent, InteractEvent, Outcome, PlayerId, TransferEvent};

use crate::domain::SessionSignal;
use crate::error::MediatorError;

/// Host event handlers (Driving Port)
pub trait InteractionHandler {
    /// A player joined: schedule the delayed load.
    fn on_connect(&mut self, player: PlayerId) -> Result<Outcome, MediatorError>;

    /// A player left: cancel a pending load, or save loaded vaults.
    fn on_disconnect(&mut self, player: PlayerId) -> Result<Outcome, MediatorError>;

    /// A click in an open inventory view.
    fn on_click(&mut self, event: &ClickEvent) -> Result<Outcome, MediatorError>;

    /// A drag in an open inventory view.
    fn on_drag(&mut self, event: &DragEvent) -> Result<Outcome, MediatorError>;

    /// A container-to-container transfer with no acting player.
    fn on_transfer(&mut self, event: &TransferEvent) -> Result<Outcome, MediatorError>;

    /// A world interaction (ender chest replacement).
    fn on_block_interact(&mut self, event: &InteractEvent) -> Result<Outcome, MediatorError>;

    /// A timer or worker completion.
    fn on_signal(&mut self, signal: SessionSignal) -> Result<(), MediatorError>;

    /// Route a host event to its handler.
    fn handle(&mut self, event: &HostEvent) -> Result<Outcome, MediatorError> {
        match event {
            HostEvent::PlayerConnected { player } => self.on_connect(*player),
            HostEvent::PlayerDisconnected { player } => self.on_disconnect(*player),
            HostEvent::InventoryClick(e) => self.on_click(e),
            HostEvent::InventoryDrag(e) => self.on_drag(e),
            HostEvent::ItemTransfer(e) => self.on_transfer(e),
            HostEvent::BlockInteract(e) => self.on_block_interact(e),
        }
    }
}
