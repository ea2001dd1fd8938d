//! # Host Ingress
//!
//! The path host events take into the dispatcher. Unlike the broadcast bus
//! it never drops an event: every submitted event reaches the receiver, in
//! submission order, until the receiver closes.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;
use vault_types::HostEvent;

/// A host event tagged with the id its outcome will carry back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEnvelope {
    /// Id the outcome will carry back.
    pub correlation_id: Uuid,
    /// The event itself.
    pub event: HostEvent,
}

impl HostEnvelope {
    /// Wrap a host event with a fresh correlation id.
    #[must_use]
    pub fn new(event: HostEvent) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            event,
        }
    }
}

/// Errors from submitting host events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngressError {
    /// The receiving dispatcher has stopped.
    #[error("Host ingress closed, dispatcher no longer accepts events")]
    Closed,
}

/// Create a connected ingress pair.
#[must_use]
pub fn host_ingress() -> (HostIngress, IngressReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let ingress = HostIngress {
        sender,
        submitted: Arc::new(AtomicU64::new(0)),
    };
    (ingress, IngressReceiver { receiver })
}

/// Submitting side, held by host bindings. Cheap to clone.
///
/// Submitting never waits, so it is safe from the host's dispatch thread.
#[derive(Clone)]
pub struct HostIngress {
    sender: mpsc::UnboundedSender<HostEnvelope>,
    submitted: Arc<AtomicU64>,
}

impl HostIngress {
    /// Submit a host event; returns the correlation id of its outcome.
    pub fn submit(&self, event: HostEvent) -> Result<Uuid, IngressError> {
        let envelope = HostEnvelope::new(event);
        let correlation_id = envelope.correlation_id;
        self.submit_envelope(envelope)?;
        Ok(correlation_id)
    }

    /// Submit an already tagged host event.
    pub fn submit_envelope(&self, envelope: HostEnvelope) -> Result<(), IngressError> {
        let correlation_id = envelope.correlation_id;
        let kind = envelope.event.kind();

        if self.sender.send(envelope).is_err() {
            warn!(%correlation_id, ?kind, "Host event refused, ingress closed");
            return Err(IngressError::Closed);
        }

        self.submitted.fetch_add(1, Ordering::Relaxed);
        debug!(%correlation_id, ?kind, "Host event submitted");
        Ok(())
    }

    /// Total events accepted.
    #[must_use]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Whether the receiver has closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving side, owned by the dispatcher.
pub struct IngressReceiver {
    receiver: mpsc::UnboundedReceiver<HostEnvelope>,
}

impl IngressReceiver {
    /// Next host event; `None` once every `HostIngress` is gone, or after
    /// `close` once the backlog is drained.
    pub async fn recv(&mut self) -> Option<HostEnvelope> {
        self.receiver.recv().await
    }

    /// Next queued host event without waiting.
    pub fn try_recv(&mut self) -> Option<HostEnvelope> {
        self.receiver.try_recv().ok()
    }

    /// Refuse new submissions. Events already queued stay receivable.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
