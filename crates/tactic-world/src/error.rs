//! Error types for the `tactic-world` crate.

use tactic_types::ConcreteObjectId;

/// Errors that can occur during world operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    /// No live entity has the given id (never spawned, or despawned).
    #[error("entity not found: {0}")]
    EntityNotFound(ConcreteObjectId),

    /// A proxy source is already registered for the abstract id.
    #[error("proxy source already registered for abstract object {0}")]
    DuplicateProxy(u32),
}
