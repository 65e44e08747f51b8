//! The runtime world: live entities keyed by [`ConcreteObjectId`].
//!
//! Two tables answer data source lookups. Live entities answer
//! [`DataSourceId::Concrete`] ids and disappear when despawned, so a stale
//! id resolves to nothing. Proxy sources answer [`DataSourceId::Abstract`]
//! ids; they stand in for objects authored in the scene that have no live
//! counterpart registered through identifier remapping.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tactic_types::{CapabilityKind, ConcreteObjectId, DataSourceId, DataSourceResolver, ObjectHandle};
use tracing::debug;

use crate::error::WorldError;

/// A runtime entity with a set of capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Display name.
    pub name: String,
    /// Capabilities (components) attached to the entity.
    pub capabilities: BTreeSet<CapabilityKind>,
}

impl Entity {
    /// Create an entity with the given capabilities.
    pub fn new(name: impl Into<String>, capabilities: &[CapabilityKind]) -> Self {
        Self {
            name: name.into(),
            capabilities: capabilities.iter().copied().collect(),
        }
    }

    fn handle(&self, source: DataSourceId) -> ObjectHandle {
        ObjectHandle {
            source,
            name: self.name.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

/// In-memory runtime world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeWorld {
    /// Live entities by concrete id.
    live: BTreeMap<ConcreteObjectId, Entity>,
    /// Proxy sources by abstract object id.
    proxies: BTreeMap<u32, Entity>,
}

impl RuntimeWorld {
    /// Create an empty world.
    pub const fn new() -> Self {
        Self {
            live: BTreeMap::new(),
            proxies: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Live entities
    // -------------------------------------------------------------------

    /// Spawn a live entity and return its fresh id.
    pub fn spawn(&mut self, entity: Entity) -> ConcreteObjectId {
        let id = ConcreteObjectId::new();
        debug!(entity = %id, name = entity.name, "Entity spawned");
        self.live.insert(id, entity);
        id
    }

    /// Despawn a live entity. Its id goes stale.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if no live entity has `id`.
    pub fn despawn(&mut self, id: ConcreteObjectId) -> Result<Entity, WorldError> {
        let entity = self
            .live
            .remove(&id)
            .ok_or(WorldError::EntityNotFound(id))?;
        debug!(entity = %id, name = entity.name, "Entity despawned");
        Ok(entity)
    }

    /// Get a live entity.
    pub fn entity(&self, id: ConcreteObjectId) -> Option<&Entity> {
        self.live.get(&id)
    }

    /// Get a live entity mutably, for example to attach a capability.
    pub fn entity_mut(&mut self, id: ConcreteObjectId) -> Option<&mut Entity> {
        self.live.get_mut(&id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    // -------------------------------------------------------------------
    // Proxy sources
    // -------------------------------------------------------------------

    /// Register a proxy source answering for the abstract object `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateProxy`] if one is already registered.
    pub fn register_proxy(&mut self, id: u32, entity: Entity) -> Result<(), WorldError> {
        if self.proxies.contains_key(&id) {
            return Err(WorldError::DuplicateProxy(id));
        }
        self.proxies.insert(id, entity);
        Ok(())
    }

    /// Remove the proxy source for the abstract object `id`.
    pub fn remove_proxy(&mut self, id: u32) -> Option<Entity> {
        self.proxies.remove(&id)
    }
}

impl DataSourceResolver for RuntimeWorld {
    fn data_source(&self, id: DataSourceId) -> Option<ObjectHandle> {
        let entity = match id {
            DataSourceId::Concrete(concrete) => self.live.get(&concrete),
            DataSourceId::Abstract(abstract_id) => self.proxies.get(&abstract_id),
        };
        entity.map(|entity| entity.handle(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_entity_resolves_by_concrete_id() {
        let mut world = RuntimeWorld::new();
        let id = world.spawn(Entity::new("Soldier", &[CapabilityKind::Navigator]));

        let handle = world.data_source(DataSourceId::Concrete(id));
        assert_eq!(handle.as_ref().map(|h| h.name.as_str()), Some("Soldier"));
        assert_eq!(handle.map(|h| h.source), Some(DataSourceId::Concrete(id)));
    }

    #[test]
    fn despawned_id_goes_stale() {
        let mut world = RuntimeWorld::new();
        let id = world.spawn(Entity::new("Soldier", &[]));
        assert!(world.despawn(id).is_ok());

        assert!(world.data_source(DataSourceId::Concrete(id)).is_none());
        assert_eq!(world.despawn(id), Err(WorldError::EntityNotFound(id)));
    }

    #[test]
    fn proxy_sources_answer_abstract_ids() {
        let mut world = RuntimeWorld::new();
        assert!(world.register_proxy(7, Entity::new("Crate", &[CapabilityKind::CoverPoint])).is_ok());
        assert_eq!(
            world.register_proxy(7, Entity::new("Other", &[])),
            Err(WorldError::DuplicateProxy(7))
        );

        let handle = world.data_source(DataSourceId::Abstract(7));
        assert_eq!(handle.map(|h| h.name), Some(String::from("Crate")));
        assert!(world.data_source(DataSourceId::Abstract(8)).is_none());

        assert!(world.remove_proxy(7).is_some());
        assert!(world.data_source(DataSourceId::Abstract(7)).is_none());
    }

    #[test]
    fn capability_added_after_spawn_is_visible() {
        let mut world = RuntimeWorld::new();
        let id = world.spawn(Entity::new("Soldier", &[]));
        if let Some(entity) = world.entity_mut(id) {
            entity.capabilities.insert(CapabilityKind::WeaponHolder);
        }
        let handle = world.data_source(DataSourceId::Concrete(id));
        assert!(
            handle
                .and_then(|h| h.capability(CapabilityKind::WeaponHolder))
                .is_some()
        );
    }

    #[test]
    fn world_serializes() {
        let mut world = RuntimeWorld::new();
        world.spawn(Entity::new("Soldier", &[CapabilityKind::Transform]));
        let json = serde_json::to_string(&world);
        assert!(json.is_ok());
    }
}
