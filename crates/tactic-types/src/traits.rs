//! Trait structs attached to abstract plan objects.
//!
//! The set of trait kinds is closed and known when action schemas are
//! authored, so every trait is a plain struct plus a [`TraitKind`] tag.
//! Field access goes through static field tables so binding expressions
//! like `CoverSpot.Location.Position` can be checked without reflection.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A cell on the tactical grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridPosition {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPosition {
    /// Create a grid position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The value of a single named field within a trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer quantity.
    Integer(i64),
    /// Grid position.
    Position(GridPosition),
}

// ---------------------------------------------------------------------------
// Trait kinds
// ---------------------------------------------------------------------------

/// Tag for each trait kind known to the Cover Tactic domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TraitKind {
    /// An actor that takes turns.
    Agent,
    /// Something with a position on the grid.
    Location,
    /// Something that can be moved.
    Moveable,
    /// Something that can be picked up.
    Item,
    /// A spot that offers protection.
    Cover,
}

impl TraitKind {
    /// Every trait kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Agent,
        Self::Location,
        Self::Moveable,
        Self::Item,
        Self::Cover,
    ];

    /// Name used in binding expressions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Location => "Location",
            Self::Moveable => "Moveable",
            Self::Item => "Item",
            Self::Cover => "Cover",
        }
    }

    /// Look a trait kind up by its binding-expression name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Names of the fields carried by this trait.
    pub const fn field_names(self) -> &'static [&'static str] {
        match self {
            Self::Agent => &["HasWeapon", "Health"],
            Self::Location => &["Position"],
            Self::Moveable => &[],
            Self::Item => &["IsWeapon", "Damage"],
            Self::Cover => &["Protection", "Occupied"],
        }
    }

    /// Return the static field name matching `name`, if this trait has it.
    pub fn field(self, name: &str) -> Option<&'static str> {
        self.field_names()
            .iter()
            .copied()
            .find(|field| *field == name)
    }
}

impl core::fmt::Display for TraitKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Trait structs
// ---------------------------------------------------------------------------

/// An actor that takes turns in the tactic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Whether the agent is carrying a weapon.
    pub has_weapon: bool,
    /// Remaining health points.
    pub health: u32,
}

/// Position on the tactical grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Grid cell occupied by the object.
    pub position: GridPosition,
}

/// Marker trait for objects that can move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moveable;

/// Something that can be picked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Whether the item is a weapon.
    pub is_weapon: bool,
    /// Damage dealt when used.
    pub damage: u32,
}

/// A spot that offers protection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    /// Protection granted to an occupant.
    pub protection: u32,
    /// Whether an agent already occupies the spot.
    pub occupied: bool,
}

/// A trait struct of any kind, as fetched from a state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraitValue {
    /// An [`Agent`] trait.
    Agent(Agent),
    /// A [`Location`] trait.
    Location(Location),
    /// A [`Moveable`] trait.
    Moveable(Moveable),
    /// An [`Item`] trait.
    Item(Item),
    /// A [`Cover`] trait.
    Cover(Cover),
}

impl TraitValue {
    /// The kind tag of the wrapped trait.
    pub const fn kind(&self) -> TraitKind {
        match self {
            Self::Agent(_) => TraitKind::Agent,
            Self::Location(_) => TraitKind::Location,
            Self::Moveable(_) => TraitKind::Moveable,
            Self::Item(_) => TraitKind::Item,
            Self::Cover(_) => TraitKind::Cover,
        }
    }

    /// Extract a named field from the wrapped trait.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            Self::Agent(t) => t.field(name),
            Self::Location(t) => t.field(name),
            Self::Moveable(t) => t.field(name),
            Self::Item(t) => t.field(name),
            Self::Cover(t) => t.field(name),
        }
    }
}

/// Typed access to one trait kind.
pub trait TraitData: Sized {
    /// The tag for this trait.
    const KIND: TraitKind;

    /// Extract a named field, or `None` if this trait has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Wrap into a [`TraitValue`].
    fn into_value(self) -> TraitValue;

    /// Unwrap from a [`TraitValue`] of the matching kind.
    fn from_value(value: &TraitValue) -> Option<Self>;
}

/// Implements the [`TraitValue`] conversions for a trait struct.
macro_rules! trait_value_conversions {
    ($name:ident) => {
        fn into_value(self) -> TraitValue {
            TraitValue::$name(self)
        }

        fn from_value(value: &TraitValue) -> Option<Self> {
            match value {
                TraitValue::$name(t) => Some(*t),
                _ => None,
            }
        }
    };
}

impl TraitData for Agent {
    const KIND: TraitKind = TraitKind::Agent;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "HasWeapon" => Some(FieldValue::Bool(self.has_weapon)),
            "Health" => Some(FieldValue::Integer(i64::from(self.health))),
            _ => None,
        }
    }

    trait_value_conversions!(Agent);
}

impl TraitData for Location {
    const KIND: TraitKind = TraitKind::Location;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Position" => Some(FieldValue::Position(self.position)),
            _ => None,
        }
    }

    trait_value_conversions!(Location);
}

impl TraitData for Moveable {
    const KIND: TraitKind = TraitKind::Moveable;

    fn field(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    trait_value_conversions!(Moveable);
}

impl TraitData for Item {
    const KIND: TraitKind = TraitKind::Item;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "IsWeapon" => Some(FieldValue::Bool(self.is_weapon)),
            "Damage" => Some(FieldValue::Integer(i64::from(self.damage))),
            _ => None,
        }
    }

    trait_value_conversions!(Item);
}

impl TraitData for Cover {
    const KIND: TraitKind = TraitKind::Cover;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Protection" => Some(FieldValue::Integer(i64::from(self.protection))),
            "Occupied" => Some(FieldValue::Bool(self.occupied)),
            _ => None,
        }
    }

    trait_value_conversions!(Cover);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_names_roundtrip() {
        for kind in TraitKind::ALL {
            assert_eq!(TraitKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TraitKind::from_name("Weapon"), None);
        assert_eq!(TraitKind::from_name(""), None);
    }

    #[test]
    fn field_tables_match_accessors() {
        let values = [
            Agent::default().into_value(),
            Location::default().into_value(),
            Moveable.into_value(),
            Item::default().into_value(),
            Cover::default().into_value(),
        ];
        for value in values {
            for field in value.kind().field_names() {
                assert!(
                    value.field(field).is_some(),
                    "{} lists {field} but does not expose it",
                    value.kind()
                );
            }
            assert_eq!(value.field("NoSuchField"), None);
        }
    }

    #[test]
    fn location_position_field() {
        let location = Location {
            position: GridPosition::new(4, 2),
        };
        assert_eq!(
            location.into_value().field("Position"),
            Some(FieldValue::Position(GridPosition::new(4, 2)))
        );
    }

    #[test]
    fn from_value_rejects_other_kinds() {
        let value = Cover::default().into_value();
        assert_eq!(Item::from_value(&value), None);
        assert_eq!(Cover::from_value(&value), Some(Cover::default()));
    }
}
