//! # Dispatcher
//!
//! The single task that owns the mediator. It multiplexes three inputs:
//!
//! - host events from the host ingress
//! - session signals from load timers and persistence workers
//! - control messages (config reload) and the shutdown watch
//!
//! Every host event is answered with exactly one `BusEvent::Outcome` carrying
//! the host event's correlation id, including events still queued when
//! shutdown begins. A mediator error fails closed: the outcome suppresses
//! the interaction.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use vault_bus::{BusEvent, EventPublisher, HostEnvelope, IngressReceiver};
use vault_mediator::{InteractionHandler, InteractionMediator, MediatorConfig, SessionSignal};
use vault_types::Outcome;

/// Control messages accepted by a running dispatcher.
#[derive(Debug, Clone)]
pub enum Control {
    /// Swap in a reloaded mediator configuration.
    Reload(MediatorConfig),
}

/// What the dispatcher did over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Host events answered
    pub events_handled: u64,
    /// Host events that failed closed
    pub events_failed: u64,
    /// Session signals applied
    pub signals_applied: u64,
    /// Saves started by shutdown
    pub saves_on_shutdown: usize,
    /// All persistence work finished within the grace period
    pub drained: bool,
}

/// Dispatcher loop state.
pub struct Dispatcher {
    mediator: InteractionMediator,
    events: IngressReceiver,
    signals: mpsc::UnboundedReceiver<SessionSignal>,
    control: mpsc::UnboundedReceiver<Control>,
    shutdown: watch::Receiver<bool>,
    publisher: Arc<dyn EventPublisher>,
    shutdown_grace: Duration,
    summary: DispatchSummary,
}

impl Dispatcher {
    pub fn new(
        mediator: InteractionMediator,
        events: IngressReceiver,
        signals: mpsc::UnboundedReceiver<SessionSignal>,
        control: mpsc::UnboundedReceiver<Control>,
        shutdown: watch::Receiver<bool>,
        publisher: Arc<dyn EventPublisher>,
        shutdown_grace: Duration,
    ) -> Self {
        Self {
            mediator,
            events,
            signals,
            control,
            shutdown,
            publisher,
            shutdown_grace,
            summary: DispatchSummary::default(),
        }
    }

    /// Run until shutdown is signalled or the ingress closes, then save and
    /// drain.
    pub async fn run(mut self) -> DispatchSummary {
        info!("Dispatcher started");

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.changed() => {
                    info!("Shutdown signal received");
                    break;
                }
                Some(signal) = self.signals.recv() => self.apply_signal(signal),
                Some(control) = self.control.recv() => self.apply_control(control),
                envelope = self.events.recv() => match envelope {
                    Some(envelope) => self.dispatch(envelope),
                    None => {
                        warn!("Host ingress closed");
                        break;
                    }
                },
            }
        }

        self.drain().await
    }

    fn dispatch(&mut self, envelope: HostEnvelope) {
        let HostEnvelope {
            correlation_id,
            event,
        } = envelope;

        self.summary.events_handled += 1;
        let outcome = match self.mediator.handle(&event) {
            Ok(outcome) => outcome,
            Err(_) => {
                // Already logged by the mediator
                self.summary.events_failed += 1;
                Outcome::suppress()
            }
        };

        debug!(
            %correlation_id,
            kind = ?event.kind(),
            cancelled = outcome.cancelled,
            "Host event answered"
        );
        self.publisher.publish(BusEvent::Outcome {
            correlation_id,
            player: event.player(),
            outcome,
        });
    }

    fn apply_signal(&mut self, signal: SessionSignal) {
        self.summary.signals_applied += 1;
        // Errors are logged by the mediator; the signal is dropped.
        let _ = self.mediator.on_signal(signal);
    }

    fn apply_control(&mut self, control: Control) {
        match control {
            Control::Reload(config) => {
                if let Err(e) = self.mediator.apply_config(config) {
                    warn!(error = %e, "Rejected configuration reload");
                }
            }
        }
    }

    /// Save every loaded player and wait for persistence to finish, up to
    /// the grace period.
    async fn drain(mut self) -> DispatchSummary {
        // Answer what the host already submitted before the shutdown sweep
        self.events.close();
        while let Some(envelope) = self.events.try_recv() {
            self.dispatch(envelope);
        }

        self.summary.saves_on_shutdown = self.mediator.shutdown();

        let deadline = tokio::time::sleep(self.shutdown_grace);
        tokio::pin!(deadline);

        while !self.mediator.is_idle() {
            tokio::select! {
                _ = &mut deadline => {
                    warn!(
                        grace = ?self.shutdown_grace,
                        "Shutdown grace period elapsed with persistence still running"
                    );
                    break;
                }
                signal = self.signals.recv() => match signal {
                    Some(signal) => self.apply_signal(signal),
                    None => break,
                },
            }
        }

        self.summary.drained = self.mediator.is_idle();
        let metrics = self.mediator.metrics().snapshot();
        info!(
            events = self.summary.events_handled,
            failed = self.summary.events_failed,
            saves = self.summary.saves_on_shutdown,
            drained = self.summary.drained,
            denials = metrics.total_denials(),
            saves_failed = metrics.saves_failed,
            "Dispatcher stopped"
        );
        self.summary
    }
}
