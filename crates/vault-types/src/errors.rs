//! # Error Types
//!
//! Errors raised while constructing shared entities.

use thiserror::Error;

/// Errors from entity construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Item type identifier is empty or contains illegal characters.
    #[error("Invalid item type identifier: {0:?}")]
    InvalidItemType(String),

    /// Block kind identifier is empty or contains illegal characters.
    #[error("Invalid block kind identifier: {0:?}")]
    InvalidBlockKind(String),
}
