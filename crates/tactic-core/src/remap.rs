//! Abstract-to-concrete identifier remapping.
//!
//! The world-sync process registers a concrete entity for an abstract
//! object once the entity exists, and removes the entry when it goes
//! away. The executor only reads the table.

use std::collections::BTreeMap;

use tactic_types::{AbstractObjectId, ConcreteObjectId};
use tracing::debug;

/// Mapping from abstract object ids to concrete entity ids.
///
/// Keyed by the integer part of [`AbstractObjectId`]; debug names do not
/// participate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierRemapping {
    entries: BTreeMap<u32, ConcreteObjectId>,
}

impl IdentifierRemapping {
    /// Create an empty mapping.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register `concrete` as the live counterpart of `abstract_id`.
    ///
    /// Returns the previously registered id, if any.
    pub fn insert(
        &mut self,
        abstract_id: &AbstractObjectId,
        concrete: ConcreteObjectId,
    ) -> Option<ConcreteObjectId> {
        debug!(abstract_id = abstract_id.id, concrete = %concrete, "Remapping registered");
        self.entries.insert(abstract_id.id, concrete)
    }

    /// Remove the entry for `abstract_id`.
    pub fn remove(&mut self, abstract_id: &AbstractObjectId) -> Option<ConcreteObjectId> {
        self.entries.remove(&abstract_id.id)
    }

    /// The concrete id registered for `abstract_id`, if any.
    pub fn lookup(&self, abstract_id: &AbstractObjectId) -> Option<ConcreteObjectId> {
        self.entries.get(&abstract_id.id).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
