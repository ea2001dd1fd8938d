//! # Vault Bus - Transport Between Host Bindings and the Mediator
//!
//! Host bindings submit raw host events through the [`HostIngress`], a
//! lossless queue into the runtime dispatcher. The dispatcher runs the
//! mediator and broadcasts the outcome on the event bus, correlated by the
//! host event's id, together with selector requests.
//!
//! ```text
//! ┌──────────────┐   HostEnvelope{id, event}   ┌──────────────┐
//! │ Host Binding │ ──────── ingress ─────────→ │  Dispatcher  │
//! │              │                             │              │
//! └──────────────┘                             └──────────────┘
//!        ↑              ┌──────────────┐              │
//!        └───────────── │  Event Bus   │ ◄────────────┘
//!          subscribe()  └──────────────┘  Outcome{id, outcome}
//!                                         SelectorRequested{player, page}
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod ingress;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BusEvent, EventFilter, EventTopic};
pub use ingress::{host_ingress, HostEnvelope, HostIngress, IngressError, IngressReceiver};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the slowest one lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
