//! File-backed vault storage
//!
//! One JSON document per player under a data directory:
//!
//! ```json
//! {
//!   "version": 1,
//!   "vaults": [
//!     { "id": "…", "metadata": { "order": 1 }, "contents": [null, { "item_type": "STONE", "amount": 3 }] }
//!   ]
//! }
//! ```
//!
//! Container handles are live host objects and are not persisted; every
//! load binds each vault to a freshly allocated handle.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use vault_types::{ContainerHandle, ItemStack, PlayerId, VaultId};

use crate::domain::{vault_set, Vault, VaultMetadata, VaultSet};
use crate::error::PersistenceError;
use crate::ports::VaultPersister;

/// Current document version.
pub const FORMAT_VERSION: u32 = 1;

/// First handle allocated for loaded vaults.
pub const DEFAULT_HANDLE_BASE: u64 = 1 << 32;

#[derive(Debug, Serialize, Deserialize)]
struct VaultDocument {
    version: u32,
    vaults: Vec<VaultRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VaultRecord {
    id: VaultId,
    #[serde(default)]
    metadata: VaultMetadata,
    #[serde(default)]
    contents: Vec<Option<ItemStack>>,
}

/// JSON file vault persister
pub struct FileVaultPersister {
    dir: PathBuf,
    next_handle: AtomicU64,
}

impl FileVaultPersister {
    /// Store documents under `dir`, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_handle_base(dir, DEFAULT_HANDLE_BASE)
    }

    /// Like [`FileVaultPersister::new`], allocating handles from `base`.
    pub fn with_handle_base(dir: impl Into<PathBuf>, base: u64) -> Self {
        Self {
            dir: dir.into(),
            next_handle: AtomicU64::new(base),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document path for a player.
    pub fn path_for(&self, player: PlayerId) -> PathBuf {
        self.dir.join(format!("{player}.json"))
    }

    fn allocate_handle(&self) -> ContainerHandle {
        ContainerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }

    fn io_error(path: &Path, error: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}

#[async_trait]
impl VaultPersister for FileVaultPersister {
    async fn load(&self, player: PlayerId) -> Result<VaultSet, PersistenceError> {
        let path = self.path_for(player);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(player = %player, "No vault file, starting empty");
                return Ok(VaultSet::new());
            }
            Err(e) => return Err(Self::io_error(&path, e)),
        };

        let document: VaultDocument =
            serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Corrupt {
                player,
                reason: e.to_string(),
            })?;

        if document.version != FORMAT_VERSION {
            return Err(PersistenceError::Corrupt {
                player,
                reason: format!("unsupported format version {}", document.version),
            });
        }

        Ok(vault_set(document.vaults.into_iter().map(|record| {
            Vault::new(record.id, self.allocate_handle(), record.metadata)
                .with_contents(record.contents)
        })))
    }

    async fn save(&self, player: PlayerId, vaults: VaultSet) -> Result<(), PersistenceError> {
        let document = VaultDocument {
            version: FORMAT_VERSION,
            vaults: vaults
                .into_values()
                .map(|vault| VaultRecord {
                    id: vault.id(),
                    metadata: vault.metadata().clone(),
                    contents: vault.contents().to_vec(),
                })
                .collect(),
        };
        let json = serde_json::to_vec_pretty(&document).map_err(|e| PersistenceError::Corrupt {
            player,
            reason: e.to_string(),
        })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::io_error(&self.dir, e))?;

        // Write-then-rename so a crash never leaves a truncated document
        let path = self.path_for(player);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| Self::io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::io_error(&path, e))?;

        debug!(player = %player, path = %path.display(), "Vault file written");
        Ok(())
    }
}
