//! Binding expressions: dotted paths from a formal parameter to an
//! actuator argument.
//!
//! The grammar has three shapes:
//!
//! ```text
//! <param>                 the bound object itself
//! <param>.<trait>         a whole trait of the bound object
//! <param>.<trait>.<field> one field of that trait
//! ```

use tactic_types::{ActionKind, TraitKind};

use crate::error::BindingError;

/// What a binding expression points at once its parameter is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    /// The bound object itself.
    Object,
    /// A whole trait of the bound object.
    Trait(TraitKind),
    /// One field of a trait of the bound object.
    Field(TraitKind, &'static str),
}

/// A parsed binding expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingExpression {
    /// Index of the formal parameter named by the first segment.
    pub parameter_index: usize,
    /// Name of that formal parameter.
    pub parameter_name: &'static str,
    /// What the remaining segments point at.
    pub target: BindingTarget,
}

impl BindingExpression {
    /// Parse `expression` against the formal parameters of `action`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindingError`] when the parameter segment is empty or
    /// unknown, the segment count is not 1 to 3, or the trait or field
    /// name is not known.
    pub fn parse(expression: &str, action: ActionKind) -> Result<Self, BindingError> {
        let segments: Vec<&str> = expression.split('.').collect();

        let name = segments.first().copied().unwrap_or_default();
        if name.is_empty() {
            return Err(BindingError::EmptyParameter);
        }
        let parameter_index = action
            .parameter_index(name)
            .ok_or_else(|| BindingError::UnknownParameter(name.to_owned()))?;
        let parameter_name = action
            .parameter_names()
            .get(parameter_index)
            .copied()
            .ok_or_else(|| BindingError::UnknownParameter(name.to_owned()))?;

        let target = match segments.as_slice() {
            [_] => BindingTarget::Object,
            [_, trait_name] => BindingTarget::Trait(parse_trait(trait_name)?),
            [_, trait_name, field_name] => {
                let kind = parse_trait(trait_name)?;
                let field = kind.field(field_name).ok_or_else(|| BindingError::UnknownField {
                    trait_kind: kind,
                    field: (*field_name).to_owned(),
                })?;
                BindingTarget::Field(kind, field)
            }
            _ => return Err(BindingError::SegmentCount(segments.len())),
        };

        Ok(Self {
            parameter_index,
            parameter_name,
            target,
        })
    }
}

fn parse_trait(name: &str) -> Result<TraitKind, BindingError> {
    TraitKind::from_name(name).ok_or_else(|| BindingError::UnknownTrait(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_binds_the_object() {
        let binding = BindingExpression::parse("Self", ActionKind::TakeCover);
        assert_eq!(
            binding,
            Ok(BindingExpression {
                parameter_index: 0,
                parameter_name: "Self",
                target: BindingTarget::Object,
            })
        );
    }

    #[test]
    fn two_segments_bind_a_trait() {
        let binding = BindingExpression::parse("CoverSpot.Cover", ActionKind::TakeCover);
        assert_eq!(
            binding.map(|b| (b.parameter_index, b.target)),
            Ok((1, BindingTarget::Trait(TraitKind::Cover)))
        );
    }

    #[test]
    fn three_segments_bind_a_field() {
        let binding = BindingExpression::parse("CoverSpot.Location.Position", ActionKind::TakeCover);
        assert_eq!(
            binding.map(|b| b.target),
            Ok(BindingTarget::Field(TraitKind::Location, "Position"))
        );
    }

    #[test]
    fn empty_parameter_is_rejected_for_every_action() {
        for action in ActionKind::ALL {
            for expression in ["", ".Location", ".Location.Position", "."] {
                assert_eq!(
                    BindingExpression::parse(expression, action),
                    Err(BindingError::EmptyParameter),
                    "{action}: {expression:?}"
                );
            }
        }
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        assert_eq!(
            BindingExpression::parse("Weapon", ActionKind::TakeCover),
            Err(BindingError::UnknownParameter(String::from("Weapon")))
        );
    }

    #[test]
    fn too_many_segments_are_rejected() {
        assert_eq!(
            BindingExpression::parse("Self.Location.Position.X", ActionKind::TakeCover),
            Err(BindingError::SegmentCount(4))
        );
    }

    #[test]
    fn unknown_trait_and_field_are_rejected() {
        assert_eq!(
            BindingExpression::parse("Self.Health", ActionKind::TakeCover),
            Err(BindingError::UnknownTrait(String::from("Health")))
        );
        assert_eq!(
            BindingExpression::parse("Self.Location.Height", ActionKind::TakeCover),
            Err(BindingError::UnknownField {
                trait_kind: TraitKind::Location,
                field: String::from("Height"),
            })
        );
        assert_eq!(
            BindingExpression::parse("Self.", ActionKind::TakeCover),
            Err(BindingError::UnknownTrait(String::new()))
        );
    }
}
