//! # Core Domain Entities
//!
//! Identities, item and block identifiers, and the raw inventory facts the
//! host reports with every interaction.
//!
//! ## Clusters
//!
//! - **Identity**: `PlayerId`, `VaultId`, `ContainerHandle`
//! - **Items & Blocks**: `ItemType`, `ItemStack`, `BlockKind`
//! - **Raw Interaction Facts**: `InventoryRef`, `InventoryKind`,
//!   `InventoryAction`, `InteractAction`

use crate::errors::EntityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Opaque, stable identifier of a connected player.
///
/// Stable for the lifetime of a connection and used as the key for all
/// per-player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a fresh random identity.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a vault, unique within its owner's vault set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VaultId(pub Uuid);

impl VaultId {
    /// Generate a fresh random vault identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-assigned handle of a live, rendered container.
///
/// Only ever compared by identity. Two handles are the same container iff
/// they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerHandle(pub u64);

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

// =============================================================================
// CLUSTER B: ITEMS & BLOCKS
// =============================================================================

/// Normalize a host identifier (`"diamond_sword"` → `"DIAMOND_SWORD"`).
///
/// Accepts ASCII alphanumerics, `_`, `:` and `.`; anything else is rejected.
fn normalize_identifier(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.'));
    valid.then(|| trimmed.to_ascii_uppercase())
}

/// Type identifier of an item (material).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemType(String);

impl ItemType {
    /// The empty-slot material.
    pub const AIR: &'static str = "AIR";

    /// Parse and normalize an item type identifier.
    pub fn parse(raw: &str) -> Result<Self, EntityError> {
        normalize_identifier(raw)
            .map(Self)
            .ok_or_else(|| EntityError::InvalidItemType(raw.to_string()))
    }

    /// The normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty-slot material.
    #[must_use]
    pub fn is_air(&self) -> bool {
        self.0 == Self::AIR
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stack of items as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type of the stack.
    pub item_type: ItemType,
    /// Number of items in the stack.
    pub amount: u32,
}

impl ItemStack {
    /// Create a stack of `amount` items of `item_type`.
    #[must_use]
    pub fn new(item_type: ItemType, amount: u32) -> Self {
        Self { item_type, amount }
    }

    /// An empty stack is air or has no items; hosts report both for "no item".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount == 0 || self.item_type.is_air()
    }
}

/// Type identifier of a world block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockKind(String);

impl BlockKind {
    /// Block that opens the vault selector when the feature is enabled.
    pub const ENDER_CHEST: &'static str = "ENDER_CHEST";

    /// Parse and normalize a block kind identifier.
    pub fn parse(raw: &str) -> Result<Self, EntityError> {
        normalize_identifier(raw)
            .map(Self)
            .ok_or_else(|| EntityError::InvalidBlockKind(raw.to_string()))
    }

    /// The ender chest block.
    #[must_use]
    pub fn ender_chest() -> Self {
        Self(Self::ENDER_CHEST.to_string())
    }

    /// The normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER C: RAW INTERACTION FACTS
// =============================================================================

/// Kind of an inventory as rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryKind {
    /// The acting player's own inventory (bottom half of a view).
    Player,
    /// A chest-style container (vaults render as chests).
    Chest,
    /// Any other container type.
    Other,
}

/// A concrete (sub-)inventory the host reports as the click target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryRef {
    /// Live container handle.
    pub handle: ContainerHandle,
    /// Rendered kind.
    pub kind: InventoryKind,
}

impl InventoryRef {
    /// Reference to a player inventory.
    #[must_use]
    pub fn player(handle: ContainerHandle) -> Self {
        Self {
            handle,
            kind: InventoryKind::Player,
        }
    }

    /// Reference to a chest-style container.
    #[must_use]
    pub fn chest(handle: ContainerHandle) -> Self {
        Self {
            handle,
            kind: InventoryKind::Chest,
        }
    }
}

/// Mechanical effect of a click, as computed by the host UI.
///
/// Mirrors the host's action codes one-to-one; the mediator decides what
/// each means for a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryAction {
    /// Nothing happens.
    Nothing,
    /// All of the clicked slot goes to the cursor.
    PickupAll,
    /// Some of the clicked slot goes to the cursor.
    PickupSome,
    /// Half of the clicked slot goes to the cursor.
    PickupHalf,
    /// One item of the clicked slot goes to the cursor.
    PickupOne,
    /// All of the cursor goes into the clicked slot.
    PlaceAll,
    /// Some of the cursor goes into the clicked slot.
    PlaceSome,
    /// One item of the cursor goes into the clicked slot.
    PlaceOne,
    /// Cursor and clicked slot are exchanged.
    SwapWithCursor,
    /// The whole cursor is dropped on the ground.
    DropAllCursor,
    /// One cursor item is dropped on the ground.
    DropOneCursor,
    /// The whole clicked slot is dropped on the ground.
    DropAllSlot,
    /// One item of the clicked slot is dropped on the ground.
    DropOneSlot,
    /// Shift-click: the clicked stack moves to the other inventory of the view.
    MoveToOtherInventory,
    /// Clicked item moves to the hotbar, the hotbar item is re-added elsewhere.
    HotbarMoveAndReadd,
    /// Clicked slot and a hotbar slot are exchanged.
    HotbarSwap,
    /// Creative-mode clone of the clicked stack.
    CloneStack,
    /// Double-click gather of matching items onto the cursor.
    CollectToCursor,
    /// Action the host could not categorize.
    Unknown,
}

/// Kind of a world interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractAction {
    /// Right click on a block.
    RightClickBlock,
    /// Left click on a block.
    LeftClickBlock,
    /// Right click on air.
    RightClickAir,
    /// Left click on air.
    LeftClickAir,
    /// Pressure plates and similar.
    Physical,
}
