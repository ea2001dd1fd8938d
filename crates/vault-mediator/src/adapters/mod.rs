//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the outbound ports.
//!
//! ## Adapters
//!
//! - `InMemoryVaultPersister` - map-backed storage with failure injection
//! - `FileVaultPersister` - one JSON document per player
//! - `InMemoryPermissions` - per-player grants, defaults and blacklist bypass
//! - `StaticMessageCatalog` - English messages with `&` colour codes
//! - `TomlConfigSource` - dotted-key lookups over a TOML document
//! - `RecordingSelectorLauncher` - records selector requests

pub mod file;
pub mod memory;
pub mod messages;
pub mod permissions;
pub mod selector;
pub mod toml_config;

pub use file::FileVaultPersister;
pub use memory::InMemoryVaultPersister;
pub use messages::{translate_colour_codes, StaticMessageCatalog};
pub use permissions::InMemoryPermissions;
pub use selector::RecordingSelectorLauncher;
pub use toml_config::TomlConfigSource;
