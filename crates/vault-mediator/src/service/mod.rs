//! Service Layer
//!
//! Orchestrates the domain logic and the driven ports.

pub mod lifecycle;
pub mod mediator;

pub use lifecycle::SessionLifecycleManager;
pub use mediator::{InteractionMediator, MediatorPorts, FIRST_SELECTOR_PAGE};
