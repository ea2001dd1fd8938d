//! # Host Events
//!
//! Raw events reported by the host. Each carries only the facts the mediator
//! needs; nothing here holds a live reference into the host.

use crate::entities::{
    BlockKind, ContainerHandle, InteractAction, InventoryAction, InventoryRef, ItemStack, PlayerId,
};
use serde::{Deserialize, Serialize};

/// Every event the host can hand to the mediator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// A player finished joining.
    PlayerConnected {
        /// The joining player.
        player: PlayerId,
    },

    /// A player left (quit or kicked).
    PlayerDisconnected {
        /// The leaving player.
        player: PlayerId,
    },

    /// A click inside an open inventory view.
    InventoryClick(ClickEvent),

    /// A drag across slots of an open inventory view.
    InventoryDrag(DragEvent),

    /// A container-to-container move with no acting player (hopper-style).
    ItemTransfer(TransferEvent),

    /// A player interacted with the world.
    BlockInteract(InteractEvent),
}

/// Discriminant of a [`HostEvent`], used for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostEventKind {
    Connect,
    Disconnect,
    Click,
    Drag,
    Transfer,
    Interact,
}

impl HostEvent {
    /// The acting player, if the event has one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::PlayerConnected { player } | Self::PlayerDisconnected { player } => Some(*player),
            Self::InventoryClick(e) => Some(e.player),
            Self::InventoryDrag(e) => Some(e.player),
            Self::BlockInteract(e) => Some(e.player),
            Self::ItemTransfer(_) => None,
        }
    }

    /// The event kind.
    #[must_use]
    pub fn kind(&self) -> HostEventKind {
        match self {
            Self::PlayerConnected { .. } => HostEventKind::Connect,
            Self::PlayerDisconnected { .. } => HostEventKind::Disconnect,
            Self::InventoryClick(_) => HostEventKind::Click,
            Self::InventoryDrag(_) => HostEventKind::Drag,
            Self::ItemTransfer(_) => HostEventKind::Transfer,
            Self::BlockInteract(_) => HostEventKind::Interact,
        }
    }
}

/// A click inside an open inventory view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// The clicking player.
    pub player: PlayerId,
    /// Top container of the open view (the vault, when one is open).
    pub view_top: ContainerHandle,
    /// Sub-inventory that was clicked; `None` for clicks outside any slot.
    pub clicked: Option<InventoryRef>,
    /// Mechanical effect computed by the host.
    pub action: InventoryAction,
    /// Item in the clicked slot before the click.
    pub current_item: Option<ItemStack>,
    /// Item on the cursor before the click.
    pub cursor: Option<ItemStack>,
    /// Item in the hotbar slot involved in a hotbar action.
    pub hotbar_item: Option<ItemStack>,
}

impl ClickEvent {
    /// Whether the clicked slot held an item before the click.
    #[must_use]
    pub fn slot_occupied(&self) -> bool {
        self.current_item.as_ref().is_some_and(|item| !item.is_empty())
    }
}

/// A drag of the cursor stack across one or more slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEvent {
    /// The dragging player.
    pub player: PlayerId,
    /// Top container of the open view.
    pub view_top: ContainerHandle,
    /// The stack being spread.
    pub cursor: Option<ItemStack>,
    /// Whether any dragged slot belongs to the top container.
    pub lands_in_view_top: bool,
}

/// A move between two containers initiated by the world, not a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Container items are taken from.
    pub source: ContainerHandle,
    /// Container items are moved into.
    pub destination: ContainerHandle,
    /// The moved stack.
    pub item: ItemStack,
}

/// A player interaction with the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractEvent {
    /// The interacting player.
    pub player: PlayerId,
    /// Interaction kind.
    pub action: InteractAction,
    /// Targeted block; `None` for air.
    pub block: Option<BlockKind>,
}
