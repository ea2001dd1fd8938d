//! Action classifier
//!
//! Turns raw UI interaction facts into what they mean for a vault: items
//! leave it, items enter it, or neither. Pure, total and deterministic.

use serde::{Deserialize, Serialize};
use vault_types::{ClickEvent, ContainerHandle, InventoryAction, InventoryKind, InventoryRef, ItemStack};

/// Semantic intent of an interaction with respect to a vault
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Items leave the vault
    Take,
    /// Items enter the vault
    Add,
    /// The vault's contents are unaffected
    Neutral,
}

impl Intent {
    /// Capability suffix for this intent, if it needs one.
    pub fn capability_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Take => Some("take"),
            Self::Add => Some("add"),
            Self::Neutral => None,
        }
    }
}

/// Classify a click in a view whose top container is `vault_container`.
///
/// Rules, first match wins:
/// 1. `Nothing` is neutral.
/// 2. Clicks inside the vault: pickups, drops from the slot, hotbar moves and
///    shift-clicks take; placements and cursor swaps add; a hotbar swap takes
///    when the vault slot was occupied and adds when it was empty.
/// 3. Shift-click in the player's own inventory adds.
/// 4. Everything else is neutral.
pub fn classify_click(
    vault_container: ContainerHandle,
    clicked: Option<InventoryRef>,
    action: InventoryAction,
    slot_occupied: bool,
) -> Intent {
    use InventoryAction::*;

    if action == Nothing {
        return Intent::Neutral;
    }

    let Some(clicked) = clicked else {
        return Intent::Neutral;
    };

    if clicked.handle == vault_container {
        return match action {
            PickupAll | PickupSome | PickupHalf | PickupOne => Intent::Take,
            DropAllSlot | DropOneSlot | HotbarMoveAndReadd => Intent::Take,
            MoveToOtherInventory => Intent::Take,
            HotbarSwap if slot_occupied => Intent::Take,
            HotbarSwap => Intent::Add,
            PlaceAll | PlaceSome | PlaceOne | SwapWithCursor => Intent::Add,
            Nothing | DropAllCursor | DropOneCursor | CloneStack | CollectToCursor | Unknown => {
                Intent::Neutral
            }
        };
    }

    if clicked.kind == InventoryKind::Player && action == MoveToOtherInventory {
        return Intent::Add;
    }

    Intent::Neutral
}

/// A drag adds to the vault when any dragged slot lands in it.
pub fn classify_drag(lands_in_vault: bool) -> Intent {
    if lands_in_vault {
        Intent::Add
    } else {
        Intent::Neutral
    }
}

/// A container transfer adds to the vault when the vault is the destination.
pub fn classify_transfer(destination_is_vault: bool) -> Intent {
    if destination_is_vault {
        Intent::Add
    } else {
        Intent::Neutral
    }
}

/// The stack whose content is checked against the blacklist for a click.
///
/// Adds check what enters the vault; everything else checks the clicked slot.
pub fn subject_item(intent: Intent, event: &ClickEvent) -> Option<&ItemStack> {
    use InventoryAction::*;

    match (intent, event.action) {
        (Intent::Add, PlaceAll | PlaceSome | PlaceOne | SwapWithCursor) => event.cursor.as_ref(),
        (Intent::Add, HotbarSwap) => event.hotbar_item.as_ref(),
        _ => event.current_item.as_ref(),
    }
}

/// The second leg of a swap on a vault slot.
///
/// A hotbar swap onto an occupied slot takes the slot's stack and also adds
/// the hotbar stack; a cursor swap adds the cursor and also takes the slot's
/// stack. Returns the leg the primary intent does not cover, with the stack
/// that moves, when that stack is non-empty.
pub fn swap_counterpart(intent: Intent, event: &ClickEvent) -> Option<(Intent, &ItemStack)> {
    use InventoryAction::*;

    if event.clicked.map(|c| c.handle) != Some(event.view_top) {
        return None;
    }

    let (leg, stack) = match (intent, event.action) {
        (Intent::Take, HotbarSwap) => (Intent::Add, event.hotbar_item.as_ref()?),
        (Intent::Add, SwapWithCursor) => (Intent::Take, event.current_item.as_ref()?),
        _ => return None,
    };

    (!stack.is_empty()).then_some((leg, stack))
}
