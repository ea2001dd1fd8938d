//! # Vault Types Crate
//!
//! This crate contains the entities, host events and event outcomes that
//! cross crate boundaries in the vault mediator workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type the bus carries is defined here.
//! - **Opaque Host Handles**: containers are identified by `ContainerHandle`,
//!   compared by identity only; the core never inspects host internals.
//! - **Outcomes, not callbacks**: handlers report what the host must do
//!   (`Outcome`) instead of reaching back into the host.

pub mod entities;
pub mod errors;
pub mod events;
pub mod outcome;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use outcome::*;
