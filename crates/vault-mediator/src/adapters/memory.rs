//! In-memory vault storage
//!
//! Keeps saved vault sets in a map. Used by tests and by runtimes without a
//! data directory; supports artificial latency and failure injection.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use vault_types::PlayerId;

use crate::domain::VaultSet;
use crate::error::PersistenceError;
use crate::ports::VaultPersister;

/// In-memory vault persister
#[derive(Default)]
pub struct InMemoryVaultPersister {
    stored: RwLock<HashMap<PlayerId, VaultSet>>,
    loads: AtomicU64,
    saves: AtomicU64,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    latency: RwLock<Duration>,
}

impl InMemoryVaultPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to delay every load and save
    pub fn with_latency(self, latency: Duration) -> Self {
        self.set_latency(latency);
        self
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.write() = latency;
    }

    /// Store a vault set as if it had been saved earlier.
    pub fn seed(&self, player: PlayerId, vaults: VaultSet) {
        self.stored.write().insert(player, vaults);
    }

    /// The last saved set for a player.
    pub fn stored(&self, player: PlayerId) -> Option<VaultSet> {
        self.stored.read().get(&player).cloned()
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of load calls so far
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of save calls so far
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.read();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl VaultPersister for InMemoryVaultPersister {
    async fn load(&self, player: PlayerId) -> Result<VaultSet, PersistenceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("injected load failure".into()));
        }
        Ok(self.stored(player).unwrap_or_default())
    }

    async fn save(&self, player: PlayerId, vaults: VaultSet) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("injected save failure".into()));
        }
        self.seed(player, vaults);
        Ok(())
    }
}
