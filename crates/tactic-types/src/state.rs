//! Abstract plan state snapshots and the interfaces used to read them.
//!
//! The planner owns the real storage engine. The bridge only needs two
//! read-only views: [`StateSnapshot`] over a single plan state, and
//! [`StateProvider`] to look snapshots up by [`StateKey`]. [`StateData`]
//! and [`StateStore`] are in-memory implementations used by the engine
//! binary and by tests.

use std::collections::BTreeMap;

use crate::ids::{AbstractObjectId, AbstractObjectRef, StateKey};
use crate::traits::{TraitData, TraitKind, TraitValue};

/// Read-only view over one abstract state snapshot.
pub trait StateSnapshot {
    /// Number of objects in the snapshot's object table.
    fn object_count(&self) -> usize;

    /// The stable id of the object at `object`, or `None` if the
    /// reference is out of range.
    fn object_id(&self, object: AbstractObjectRef) -> Option<&AbstractObjectId>;

    /// Fetch the trait of the given kind attached to `object`.
    fn trait_value(&self, object: AbstractObjectRef, kind: TraitKind) -> Option<TraitValue>;

    /// Typed variant of [`trait_value`](Self::trait_value).
    fn get_trait<T: TraitData>(&self, object: AbstractObjectRef) -> Option<T>
    where
        Self: Sized,
    {
        self.trait_value(object, T::KIND)
            .and_then(|value| T::from_value(&value))
    }
}

/// Looks plan state snapshots up by key.
pub trait StateProvider {
    /// Return the snapshot stored under `key`, if any.
    fn state_data(&self, key: StateKey) -> Option<&dyn StateSnapshot>;
}

/// One trait-bearing object in an in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitBasedObject {
    /// Stable id of the object.
    pub id: AbstractObjectId,
    /// Attached traits keyed by kind.
    pub traits: BTreeMap<TraitKind, TraitValue>,
}

/// In-memory plan state snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateData {
    objects: Vec<TraitBasedObject>,
}

impl StateData {
    /// Create an empty snapshot.
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Append an object with no traits and return its reference.
    pub fn add_object(&mut self, id: AbstractObjectId) -> AbstractObjectRef {
        let index = self.objects.len();
        self.objects.push(TraitBasedObject {
            id,
            traits: BTreeMap::new(),
        });
        AbstractObjectRef(index)
    }

    /// Attach (or replace) a trait on an object.
    ///
    /// Returns `false` if `object` is out of range.
    pub fn set_trait<T: TraitData>(&mut self, object: AbstractObjectRef, value: T) -> bool {
        match self.objects.get_mut(object.0) {
            Some(entry) => {
                entry.traits.insert(T::KIND, value.into_value());
                true
            }
            None => false,
        }
    }

    /// Find the reference of the object with the given stable id.
    pub fn find_object(&self, id: u32) -> Option<AbstractObjectRef> {
        self.objects
            .iter()
            .position(|object| object.id.id == id)
            .map(AbstractObjectRef)
    }

    /// Iterate over all objects in table order.
    pub fn objects(&self) -> impl Iterator<Item = &TraitBasedObject> {
        self.objects.iter()
    }
}

impl StateSnapshot for StateData {
    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn object_id(&self, object: AbstractObjectRef) -> Option<&AbstractObjectId> {
        self.objects.get(object.0).map(|entry| &entry.id)
    }

    fn trait_value(&self, object: AbstractObjectRef, kind: TraitKind) -> Option<TraitValue> {
        self.objects
            .get(object.0)
            .and_then(|entry| entry.traits.get(&kind))
            .copied()
    }
}

/// In-memory [`StateProvider`] holding snapshots by key.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    states: BTreeMap<StateKey, StateData>,
}

impl StateStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Store a snapshot under a fresh key and return the key.
    pub fn insert(&mut self, data: StateData) -> StateKey {
        let key = StateKey::new();
        self.states.insert(key, data);
        key
    }

    /// Drop a snapshot once the planner no longer needs it.
    pub fn remove(&mut self, key: StateKey) -> Option<StateData> {
        self.states.remove(&key)
    }

    /// Typed access to a stored snapshot.
    pub fn get(&self, key: StateKey) -> Option<&StateData> {
        self.states.get(&key)
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the store holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateProvider for StateStore {
    fn state_data(&self, key: StateKey) -> Option<&dyn StateSnapshot> {
        self.states
            .get(&key)
            .map(|data| data as &dyn StateSnapshot)
    }
}
