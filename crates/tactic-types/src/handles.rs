//! Handles over concrete runtime entities.
//!
//! The runtime world is an external collaborator. The bridge sees it only
//! through [`DataSourceResolver`], which turns a [`DataSourceId`] into an
//! [`ObjectHandle`]. A handle can then be probed for capabilities
//! (components) such as a navigator or a weapon holder.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::ConcreteObjectId;

/// A capability (component) a live entity may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapabilityKind {
    /// Position and orientation in the scene.
    Transform,
    /// Path-following movement.
    Navigator,
    /// Can carry and use a weapon.
    WeaponHolder,
    /// Marks a spot agents can take cover behind.
    CoverPoint,
}

impl CapabilityKind {
    /// Every capability kind, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Transform,
        Self::Navigator,
        Self::WeaponHolder,
        Self::CoverPoint,
    ];

    /// Name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::Navigator => "Navigator",
            Self::WeaponHolder => "WeaponHolder",
            Self::CoverPoint => "CoverPoint",
        }
    }

    /// Look a capability kind up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Which identity space a data source lookup uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataSourceId {
    /// A live entity registered through identifier remapping.
    Concrete(ConcreteObjectId),
    /// An abstract object id used directly, for objects with no live
    /// counterpart registered yet.
    Abstract(u32),
}

/// Handle over a resolved runtime object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// The id the handle was resolved from.
    pub source: DataSourceId,
    /// Display name of the object.
    pub name: String,
    /// Capabilities attached to the object at resolution time.
    pub capabilities: BTreeSet<CapabilityKind>,
}

impl ObjectHandle {
    /// Fetch a capability attached to this object, if present.
    pub fn capability(&self, kind: CapabilityKind) -> Option<CapabilityHandle> {
        self.capabilities.contains(&kind).then(|| CapabilityHandle {
            owner: self.source,
            owner_name: self.name.clone(),
            kind,
        })
    }
}

/// Handle over one capability of a runtime object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityHandle {
    /// The object carrying the capability.
    pub owner: DataSourceId,
    /// Display name of the owner.
    pub owner_name: String,
    /// Which capability this is.
    pub kind: CapabilityKind,
}

/// Resolves data source ids to object handles.
pub trait DataSourceResolver {
    /// Return a handle for `id`, or `None` if nothing (or nothing live)
    /// answers to it.
    fn data_source(&self, id: DataSourceId) -> Option<ObjectHandle>;
}
