//! Selector launcher that records requests

use parking_lot::Mutex;
use vault_types::PlayerId;

use crate::ports::SelectorLauncher;

/// Records every selector launch instead of opening a menu
#[derive(Debug, Default)]
pub struct RecordingSelectorLauncher {
    launches: Mutex<Vec<(PlayerId, u32)>>,
}

impl RecordingSelectorLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launches so far, oldest first.
    pub fn launches(&self) -> Vec<(PlayerId, u32)> {
        self.launches.lock().clone()
    }

    pub fn clear(&self) {
        self.launches.lock().clear();
    }
}

impl SelectorLauncher for RecordingSelectorLauncher {
    fn launch_for(&self, player: PlayerId, page: u32) {
        self.launches.lock().push((player, page));
    }
}
