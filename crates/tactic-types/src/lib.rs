//! Shared type definitions for the tactics plan execution bridge.
//!
//! This crate is the single source of truth for the data model shared by
//! the bridge, the runtime world, and the engine binary. Diagnostics types
//! flow downstream to `TypeScript` via `ts-rs` for external tooling.
//!
//! # Modules
//!
//! - [`ids`] -- Abstract object ids, concrete entity ids, action kind ids
//! - [`traits`] -- Trait structs, trait kinds, and field values
//! - [`state`] -- Plan state snapshot interfaces and in-memory snapshots
//! - [`handles`] -- Handles over runtime objects and their capabilities
//! - [`actions`] -- Action kinds, action keys, and resolved arguments

pub mod actions;
pub mod handles;
pub mod ids;
pub mod state;
pub mod traits;

// Re-export all public types at crate root for convenience.
pub use actions::{ActionKey, ActionKind, ActionParameterInfo, ParameterType, ResolvedArgument};
pub use handles::{CapabilityHandle, CapabilityKind, DataSourceId, DataSourceResolver, ObjectHandle};
pub use ids::{AbstractObjectId, AbstractObjectRef, ActionKindId, ConcreteObjectId, StateKey};
pub use state::{StateData, StateProvider, StateSnapshot, StateStore, TraitBasedObject};
pub use traits::{
    Agent, Cover, FieldValue, GridPosition, Item, Location, Moveable, TraitData, TraitKind,
    TraitValue,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for diagnostics types.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        let _ = crate::ids::ConcreteObjectId::export_all();
        let _ = crate::ids::ActionKindId::export_all();
        let _ = crate::ids::StateKey::export_all();
        let _ = crate::ids::AbstractObjectId::export_all();
        let _ = crate::traits::GridPosition::export_all();
        let _ = crate::traits::TraitKind::export_all();
        let _ = crate::actions::ActionKind::export_all();
        let _ = crate::actions::ActionParameterInfo::export_all();
    }
}
