//! Vault entity and its metadata
//!
//! A vault is one tier of a player's storage, rendered by the host as a
//! chest-style container. Its tier (`order`) lives in the metadata map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vault_types::{ContainerHandle, ItemStack, VaultId};

/// Metadata key holding the vault's tier.
pub const ORDER_KEY: &str = "order";

/// A single metadata value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// String-keyed vault metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultMetadata(BTreeMap<String, MetadataValue>);

impl VaultMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A player's storage vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vault {
    id: VaultId,
    metadata: VaultMetadata,
    container: ContainerHandle,
    contents: Vec<Option<ItemStack>>,
}

impl Vault {
    /// Create an empty vault bound to a live container.
    pub fn new(id: VaultId, container: ContainerHandle, metadata: VaultMetadata) -> Self {
        Self {
            id,
            metadata,
            container,
            contents: Vec::new(),
        }
    }

    /// Create an empty vault of the given tier.
    pub fn with_order(id: VaultId, container: ContainerHandle, order: i64) -> Self {
        Self::new(id, container, VaultMetadata::new().with(ORDER_KEY, order))
    }

    /// Builder-style method to set the slot contents
    pub fn with_contents(mut self, contents: Vec<Option<ItemStack>>) -> Self {
        self.contents = contents;
        self
    }

    pub fn id(&self) -> VaultId {
        self.id
    }

    pub fn metadata(&self) -> &VaultMetadata {
        &self.metadata
    }

    pub fn container(&self) -> ContainerHandle {
        self.container
    }

    pub fn contents(&self) -> &[Option<ItemStack>] {
        &self.contents
    }

    /// Whether `container` is this vault's live container.
    pub fn matches_container(&self, container: ContainerHandle) -> bool {
        self.container == container
    }

    /// The tier as an opaque capability segment.
    ///
    /// Integers and non-empty strings are readable; anything else is not.
    pub fn order(&self) -> Option<String> {
        match self.metadata.get(ORDER_KEY)? {
            MetadataValue::Int(n) => Some(n.to_string()),
            MetadataValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

/// A player's full set of vaults.
pub type VaultSet = BTreeMap<VaultId, Vault>;

/// Collect vaults into a set keyed by id.
pub fn vault_set(vaults: impl IntoIterator<Item = Vault>) -> VaultSet {
    vaults.into_iter().map(|v| (v.id(), v)).collect()
}
