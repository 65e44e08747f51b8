//! Identifier types for abstract plan objects and live runtime entities.
//!
//! Two identity spaces meet in this crate. Abstract objects live inside a
//! plan state snapshot and carry a small integer id (plus an optional
//! debug name). Concrete entities live in the runtime world and carry a
//! UUID. The `IdentifierRemapping` in `tactic-core` bridges the two.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a live entity in the runtime world.
    ///
    /// May go stale when the entity is despawned; resolving a stale id
    /// yields "not found" rather than an error.
    ConcreteObjectId
}

define_id! {
    /// Identifier of an action kind, carried inside every [`ActionKey`].
    ///
    /// The domain's action kinds use fixed values (see
    /// [`ActionKind::kind_id`]); anything else is unknown to the executor.
    ///
    /// [`ActionKey`]: crate::actions::ActionKey
    /// [`ActionKind::kind_id`]: crate::actions::ActionKind::kind_id
    ActionKindId
}

define_id! {
    /// Key of a plan state snapshot held by a state provider.
    StateKey
}

/// Stable identifier of an object inside an abstract plan state.
///
/// Unique within a single plan state. The debug name is only used for
/// display and never participates in remapping lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AbstractObjectId {
    /// Small integer id, the join key for identifier remapping.
    pub id: u32,
    /// Optional debug name assigned by the authoring tools.
    pub name: Option<String>,
}

impl AbstractObjectId {
    /// Create an unnamed abstract object id.
    pub const fn new(id: u32) -> Self {
        Self { id, name: None }
    }

    /// Create an abstract object id with a debug name.
    pub fn named(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// Name shown to diagnostics: the debug name when present, otherwise
    /// the textual form of the id.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.to_string())
    }
}

impl core::fmt::Display for AbstractObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "TraitBasedObject#{}", self.id)
    }
}

/// Index into the object table of one abstract state snapshot.
///
/// Only meaningful for the snapshot that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AbstractObjectRef(pub usize);

impl core::fmt::Display for AbstractObjectRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "object[{}]", self.0)
    }
}
