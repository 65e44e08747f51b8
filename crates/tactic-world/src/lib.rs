//! Live runtime entities for the tactics execution bridge.
//!
//! The bridge treats the runtime world as an external collaborator and
//! only talks to it through [`DataSourceResolver`]. This crate provides the
//! in-memory world used by the engine binary and by tests: entities that
//! can be spawned and despawned, plus proxy sources for objects that so far
//! exist only in the planning model.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world operations.
//! - [`world`] -- [`RuntimeWorld`], its [`Entity`] records, and the
//!   [`DataSourceResolver`] implementation.
//!
//! [`DataSourceResolver`]: tactic_types::DataSourceResolver

pub mod error;
pub mod world;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use world::{Entity, RuntimeWorld};
