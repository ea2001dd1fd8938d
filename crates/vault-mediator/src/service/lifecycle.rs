//! Session Lifecycle Manager
//!
//! Owns one lifecycle record per connected player. Loads are delayed after
//! connect and can be cancelled by a disconnect before they fire; loaded
//! vaults are saved exactly once on disconnect.
//!
//! Timers and persistence run on tokio tasks. Their only way back is the
//! [`SessionSignal`] channel, drained on the dispatch thread, so all state
//! here is touched from one thread only.
//!
//! At most one persistence operation is outstanding per player. A load that
//! comes due while that player's previous save is still running is parked
//! in `Queued` and started when the save completes.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};
use vault_types::PlayerId;

use crate::domain::{LoadTicket, SessionPhase, SessionSignal, VaultRegistry, VaultSet};
use crate::error::{MediatorError, PersistenceError};
use crate::metrics::Metrics;
use crate::ports::VaultPersister;

/// Per-player lifecycle record
#[derive(Debug)]
enum SessionState {
    PendingLoad { ticket: LoadTicket, timer: AbortHandle },
    Queued { ticket: LoadTicket },
    Loading { ticket: LoadTicket },
    Loaded,
    LoadFailed,
}

impl SessionState {
    fn phase(&self) -> SessionPhase {
        match self {
            Self::PendingLoad { .. } => SessionPhase::PendingLoad,
            Self::Queued { .. } => SessionPhase::Queued,
            Self::Loading { .. } => SessionPhase::Loading,
            Self::Loaded => SessionPhase::Loaded,
            Self::LoadFailed => SessionPhase::LoadFailed,
        }
    }
}

/// Persistence operation running on a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerOp {
    Load { ticket: LoadTicket },
    Save,
}

/// Session Lifecycle Manager
pub struct SessionLifecycleManager {
    persister: Arc<dyn VaultPersister>,
    signals: mpsc::UnboundedSender<SessionSignal>,
    load_delay: Duration,
    sessions: HashMap<PlayerId, SessionState>,
    in_flight: HashMap<PlayerId, WorkerOp>,
    next_ticket: LoadTicket,
    shutting_down: bool,
    metrics: Arc<Metrics>,
}

impl SessionLifecycleManager {
    /// Create a manager whose timers and workers report on `signals`.
    pub fn new(
        persister: Arc<dyn VaultPersister>,
        signals: mpsc::UnboundedSender<SessionSignal>,
        load_delay: Duration,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            persister,
            signals,
            load_delay,
            sessions: HashMap::new(),
            in_flight: HashMap::new(),
            next_ticket: 0,
            shutting_down: false,
            metrics,
        }
    }

    /// Change the delay used for loads scheduled from now on.
    pub fn set_load_delay(&mut self, delay: Duration) {
        self.load_delay = delay;
    }

    pub fn load_delay(&self) -> Duration {
        self.load_delay
    }

    // =========================================================================
    // HOST EVENTS
    // =========================================================================

    /// Schedule the delayed load for a connecting player.
    ///
    /// # Errors
    ///
    /// `DuplicateConnect` when the player already has a lifecycle record;
    /// nothing is scheduled in that case.
    pub fn on_connect(&mut self, player: PlayerId) -> Result<(), MediatorError> {
        if self.shutting_down {
            return Err(MediatorError::ShuttingDown);
        }
        if self.sessions.contains_key(&player) {
            return Err(MediatorError::DuplicateConnect { player });
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let timer = self.spawn_load_timer(player, ticket);
        self.sessions
            .insert(player, SessionState::PendingLoad { ticket, timer });
        self.metrics.record_load_scheduled();

        debug!(player = %player, ticket, delay = ?self.load_delay, "Vault load scheduled");
        Ok(())
    }

    /// Tear down a leaving player's session.
    ///
    /// A pending load is cancelled and nothing is saved. Loaded vaults are
    /// unregistered and handed to exactly one save. Any other phase has
    /// nothing to save.
    pub fn on_disconnect(&mut self, player: PlayerId, registry: &mut VaultRegistry) {
        let Some(state) = self.sessions.remove(&player) else {
            warn!(player = %player, "Disconnect for a player with no session");
            return;
        };

        match state {
            SessionState::PendingLoad { timer, ticket } => {
                timer.abort();
                self.metrics.record_load_cancelled();
                debug!(player = %player, ticket, "Pending vault load cancelled");
            }
            SessionState::Loaded => match registry.unregister(player) {
                Some(vaults) => self.start_save(player, vaults),
                None => warn!(player = %player, "Loaded player had no registered vaults"),
            },
            other => {
                debug!(player = %player, phase = ?other.phase(), "Disconnect with nothing to save");
            }
        }
    }

    // =========================================================================
    // SIGNALS
    // =========================================================================

    /// Apply a timer or worker signal.
    pub fn handle_signal(
        &mut self,
        signal: SessionSignal,
        registry: &mut VaultRegistry,
    ) -> Result<(), MediatorError> {
        match signal {
            SessionSignal::LoadDue { player, ticket } => {
                self.on_load_due(player, ticket);
                Ok(())
            }
            SessionSignal::LoadFinished {
                player,
                ticket,
                result,
            } => self.on_load_finished(player, ticket, result, registry),
            SessionSignal::SaveFinished { player, result } => {
                self.on_save_finished(player, result);
                Ok(())
            }
        }
    }

    /// A load timer fired.
    ///
    /// Ignored unless the player is still pending with the same ticket, which
    /// covers timers that raced a disconnect.
    pub fn on_load_due(&mut self, player: PlayerId, ticket: LoadTicket) {
        let current = match self.sessions.get(&player) {
            Some(SessionState::PendingLoad { ticket, .. }) => *ticket,
            _ => {
                debug!(player = %player, ticket, "Stale load timer ignored");
                return;
            }
        };
        if current != ticket {
            debug!(player = %player, ticket, current, "Stale load timer ignored");
            return;
        }

        if self.in_flight.contains_key(&player) {
            self.sessions.insert(player, SessionState::Queued { ticket });
            self.metrics.record_load_queued();
            debug!(player = %player, ticket, "Vault load queued behind running save");
        } else {
            self.start_load(player, ticket);
        }
    }

    /// A worker finished loading.
    ///
    /// Registers the result if the session still waits for this exact load,
    /// discards it otherwise.
    ///
    /// # Errors
    ///
    /// A registry rejection is a consistency violation; the player is left
    /// in `LoadFailed`.
    pub fn on_load_finished(
        &mut self,
        player: PlayerId,
        ticket: LoadTicket,
        result: Result<VaultSet, PersistenceError>,
        registry: &mut VaultRegistry,
    ) -> Result<(), MediatorError> {
        if self.in_flight.get(&player) == Some(&WorkerOp::Load { ticket }) {
            self.in_flight.remove(&player);
        } else {
            warn!(player = %player, ticket, "Load completion without a matching worker");
        }

        let wanted = matches!(
            self.sessions.get(&player),
            Some(SessionState::Loading { ticket: t }) if *t == ticket
        );

        let outcome = if !wanted {
            self.metrics.record_load_discarded();
            debug!(player = %player, ticket, "Discarding stale vault load");
            Ok(())
        } else {
            match result {
                Ok(vaults) => {
                    let count = vaults.len();
                    match registry.register(player, vaults) {
                        Ok(()) => {
                            self.sessions.insert(player, SessionState::Loaded);
                            self.metrics.record_load_completed();
                            info!(player = %player, vaults = count, "Vaults loaded");
                            Ok(())
                        }
                        Err(e) => {
                            self.sessions.insert(player, SessionState::LoadFailed);
                            self.metrics.record_load_failed();
                            Err(e.into())
                        }
                    }
                }
                Err(e) => {
                    self.sessions.insert(player, SessionState::LoadFailed);
                    self.metrics.record_load_failed();
                    error!(player = %player, error = %e, "Failed to load vaults");
                    Ok(())
                }
            }
        };

        self.start_queued_load(player);
        outcome
    }

    /// A worker finished saving.
    pub fn on_save_finished(&mut self, player: PlayerId, result: Result<(), PersistenceError>) {
        if self.in_flight.get(&player) == Some(&WorkerOp::Save) {
            self.in_flight.remove(&player);
        } else {
            warn!(player = %player, "Save completion without a matching worker");
        }

        self.metrics.record_save_finished(result.is_ok());
        match result {
            Ok(()) => debug!(player = %player, "Vaults saved"),
            Err(e) => error!(player = %player, error = %e, "Failed to save vaults"),
        }

        self.start_queued_load(player);
    }

    // =========================================================================
    // SHUTDOWN
    // =========================================================================

    /// Cancel every pending load and save every loaded player.
    ///
    /// Returns the number of saves started. Connects are refused afterwards.
    pub fn shutdown(&mut self, registry: &mut VaultRegistry) -> usize {
        self.shutting_down = true;

        let mut saves = 0;
        for (player, state) in std::mem::take(&mut self.sessions) {
            match state {
                SessionState::PendingLoad { timer, .. } => {
                    timer.abort();
                    self.metrics.record_load_cancelled();
                }
                SessionState::Loaded => {
                    if let Some(vaults) = registry.unregister(player) {
                        self.start_save(player, vaults);
                        saves += 1;
                    }
                }
                SessionState::Queued { .. } | SessionState::Loading { .. } | SessionState::LoadFailed => {}
            }
        }

        info!(saves, in_flight = self.in_flight.len(), "Session lifecycle shut down");
        saves
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Lifecycle phase of a player; `None` when not connected.
    pub fn phase(&self, player: PlayerId) -> Option<SessionPhase> {
        self.sessions.get(&player).map(SessionState::phase)
    }

    /// No persistence work is running.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn pending_load_count(&self) -> usize {
        self.sessions
            .values()
            .filter(|s| matches!(s, SessionState::PendingLoad { .. }))
            .count()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    // =========================================================================
    // WORKERS
    // =========================================================================

    fn spawn_load_timer(&self, player: PlayerId, ticket: LoadTicket) -> AbortHandle {
        let signals = self.signals.clone();
        let delay = self.load_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if signals.send(SessionSignal::LoadDue { player, ticket }).is_err() {
                debug!(player = %player, "Dispatch loop gone, load timer dropped");
            }
        })
        .abort_handle()
    }

    fn start_load(&mut self, player: PlayerId, ticket: LoadTicket) {
        self.sessions.insert(player, SessionState::Loading { ticket });
        self.in_flight.insert(player, WorkerOp::Load { ticket });
        self.metrics.record_load_started();

        let persister = Arc::clone(&self.persister);
        let signals = self.signals.clone();
        tokio::spawn(async move {
            let result =
                run_guarded(player, "load", async move { persister.load(player).await }).await;
            let signal = SessionSignal::LoadFinished {
                player,
                ticket,
                result,
            };
            if signals.send(signal).is_err() {
                debug!(player = %player, "Dispatch loop gone, load result dropped");
            }
        });

        debug!(player = %player, ticket, "Vault load started");
    }

    fn start_save(&mut self, player: PlayerId, vaults: VaultSet) {
        self.in_flight.insert(player, WorkerOp::Save);
        self.metrics.record_save_started();

        let count = vaults.len();
        let persister = Arc::clone(&self.persister);
        let signals = self.signals.clone();
        tokio::spawn(async move {
            let result =
                run_guarded(player, "save", async move { persister.save(player, vaults).await })
                    .await;
            if signals
                .send(SessionSignal::SaveFinished { player, result })
                .is_err()
            {
                debug!(player = %player, "Dispatch loop gone, save result dropped");
            }
        });

        debug!(player = %player, vaults = count, "Vault save started");
    }

    fn start_queued_load(&mut self, player: PlayerId) {
        if self.in_flight.contains_key(&player) {
            return;
        }
        if let Some(SessionState::Queued { ticket }) = self.sessions.get(&player) {
            let ticket = *ticket;
            self.start_load(player, ticket);
        }
    }
}

/// Await a persistence call on its own task. A panic or abort comes back as
/// `WorkerFailed`, so the completion signal is always sent.
async fn run_guarded<T, F>(
    player: PlayerId,
    op: &'static str,
    call: F,
) -> Result<T, PersistenceError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, PersistenceError>> + Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(result) => result,
        Err(e) => {
            error!(player = %player, op, error = %e, "Persistence worker did not finish");
            Err(PersistenceError::WorkerFailed(e.to_string()))
        }
    }
}
