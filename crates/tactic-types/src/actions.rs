//! Action kinds, action keys, and resolved arguments.
//!
//! [`ActionKind`] is the closed set of actions in the Cover Tactic domain.
//! Each kind carries its generated formal parameter table; the binding
//! expressions that say how to turn those parameters into actuator
//! arguments are authored separately and live in the schema registry.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::handles::{CapabilityHandle, CapabilityKind, ObjectHandle};
use crate::ids::{AbstractObjectRef, ActionKindId};
use crate::traits::{FieldValue, TraitValue};

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// An action the Cover Tactic planner can choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActionKind {
    /// An agent picks up a weapon item.
    PickupWeapon,
    /// An agent moves into a cover spot.
    TakeCover,
    /// An agent passes its turn.
    SkipTurn,
}

impl ActionKind {
    /// Every action kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::PickupWeapon, Self::TakeCover, Self::SkipTurn];

    /// Id of [`ActionKind::PickupWeapon`].
    pub const PICKUP_WEAPON_ID: ActionKindId =
        ActionKindId(Uuid::from_u128(0x6d0c_1a52_8f3e_4b7a_9e21_54c8_0b3f_a101));
    /// Id of [`ActionKind::TakeCover`].
    pub const TAKE_COVER_ID: ActionKindId =
        ActionKindId(Uuid::from_u128(0x6d0c_1a52_8f3e_4b7a_9e21_54c8_0b3f_a102));
    /// Id of [`ActionKind::SkipTurn`].
    pub const SKIP_TURN_ID: ActionKindId =
        ActionKindId(Uuid::from_u128(0x6d0c_1a52_8f3e_4b7a_9e21_54c8_0b3f_a103));

    /// Stable id the planner puts in action keys for this kind.
    pub const fn kind_id(self) -> ActionKindId {
        match self {
            Self::PickupWeapon => Self::PICKUP_WEAPON_ID,
            Self::TakeCover => Self::TAKE_COVER_ID,
            Self::SkipTurn => Self::SKIP_TURN_ID,
        }
    }

    /// Human-readable action name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PickupWeapon => "PickupWeapon",
            Self::TakeCover => "TakeCover",
            Self::SkipTurn => "SkipTurn",
        }
    }

    /// Look an action kind up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Formal parameter names, in declaration order.
    pub const fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Self::PickupWeapon => &["Agent", "Weapon"],
            Self::TakeCover => &["Self", "CoverSpot"],
            Self::SkipTurn => &["Agent"],
        }
    }

    /// Index of the formal parameter called `name`.
    pub fn parameter_index(self, name: &str) -> Option<usize> {
        self.parameter_names()
            .iter()
            .position(|parameter| *parameter == name)
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Action keys
// ---------------------------------------------------------------------------

/// The planner's choice: an action kind plus one abstract object per
/// formal parameter.
///
/// Immutable once produced, and only valid against the snapshot whose
/// object table it indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionKey {
    /// Which action kind was chosen.
    pub action_id: ActionKindId,
    /// Bound objects, one per formal parameter.
    pub parameters: Vec<AbstractObjectRef>,
}

impl ActionKey {
    /// Create an action key.
    pub const fn new(action_id: ActionKindId, parameters: Vec<AbstractObjectRef>) -> Self {
        Self {
            action_id,
            parameters,
        }
    }

    /// The object bound to formal parameter `index`.
    pub fn parameter(&self, index: usize) -> Option<AbstractObjectRef> {
        self.parameters.get(index).copied()
    }
}

// ---------------------------------------------------------------------------
// Declared parameter types and resolved arguments
// ---------------------------------------------------------------------------

/// The runtime type an actuator declares for one argument.
///
/// Only consulted for whole-object bindings, where it decides whether the
/// raw handle or one of its capabilities is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    /// The raw object handle.
    Object,
    /// A capability fetched from the object handle.
    Capability(CapabilityKind),
    /// A trait struct or field value.
    Data,
}

impl ParameterType {
    /// Parse the configuration spelling: `Object`, `Data`, or a
    /// capability name such as `Navigator`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Object" => Some(Self::Object),
            "Data" => Some(Self::Data),
            other => CapabilityKind::from_name(other).map(Self::Capability),
        }
    }
}

/// The runtime value produced for one actuator argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedArgument {
    /// A raw object handle.
    Object(ObjectHandle),
    /// A capability attached to an object.
    Capability(CapabilityHandle),
    /// A whole trait struct.
    Trait(TraitValue),
    /// A single trait field.
    Field(FieldValue),
    /// Nothing could be produced (no data source, or a missing capability).
    Absent,
}

impl ResolvedArgument {
    /// Whether the argument is [`ResolvedArgument::Absent`].
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Describes one formal parameter of an action key for external tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionParameterInfo {
    /// Formal parameter name.
    pub parameter_name: String,
    /// Display name of the bound object.
    pub object_display_name: String,
    /// Stable id of the bound object.
    pub object_stable_id: u32,
}
