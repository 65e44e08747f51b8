//! Resolves binding expressions into typed actuator arguments.
//!
//! Resolution for one argument:
//!
//! 1. Parse the expression against the action's formal parameters.
//! 2. Look up the abstract object the action key binds to that parameter.
//! 3. For a whole-object binding, find the object's data source (through
//!    identifier remapping when an entry exists, otherwise by its abstract
//!    id) and coerce the handle to the declared parameter type.
//! 4. For a trait or field binding, read the trait from the snapshot and
//!    optionally extract the field.

use tactic_types::{
    AbstractObjectRef, ActionKey, ActionKind, DataSourceId, DataSourceResolver, ObjectHandle,
    ParameterType, ResolvedArgument, StateSnapshot, TraitKind, TraitValue,
};
use tracing::{debug, warn};

use crate::binding::{BindingExpression, BindingTarget};
use crate::error::{BindingError, ResolveError};
use crate::remap::IdentifierRemapping;

/// Everything needed to resolve the arguments of one action key.
///
/// Borrowed for the duration of a single `act` call; nothing it points at
/// is mutated while it is alive.
pub struct ParameterResolver<'a> {
    action: ActionKind,
    key: &'a ActionKey,
    state: &'a dyn StateSnapshot,
    remapping: &'a IdentifierRemapping,
    world: &'a dyn DataSourceResolver,
}

impl<'a> ParameterResolver<'a> {
    /// Create a resolver for `key`, already classified as `action`.
    pub fn new(
        action: ActionKind,
        key: &'a ActionKey,
        state: &'a dyn StateSnapshot,
        remapping: &'a IdentifierRemapping,
        world: &'a dyn DataSourceResolver,
    ) -> Self {
        Self {
            action,
            key,
            state,
            remapping,
            world,
        }
    }

    /// Parse and resolve one binding expression.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Binding`] for malformed expressions and the
    /// other [`ResolveError`] variants when the action key or snapshot do
    /// not hold what the expression points at.
    pub fn resolve(
        &self,
        expression: &str,
        declared: ParameterType,
    ) -> Result<ResolvedArgument, ResolveError> {
        let binding = BindingExpression::parse(expression, self.action)?;
        self.resolve_binding(&binding, declared)
    }

    /// Resolve an already parsed binding.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_binding(
        &self,
        binding: &BindingExpression,
        declared: ParameterType,
    ) -> Result<ResolvedArgument, ResolveError> {
        let object = self
            .key
            .parameter(binding.parameter_index)
            .ok_or(ResolveError::MissingParameter(binding.parameter_index))?;

        match binding.target {
            BindingTarget::Object => self.resolve_object(object, declared),
            BindingTarget::Trait(kind) => self.fetch_trait(object, kind).map(ResolvedArgument::Trait),
            BindingTarget::Field(kind, field) => {
                let value = self.fetch_trait(object, kind)?;
                value.field(field).map(ResolvedArgument::Field).ok_or_else(|| {
                    ResolveError::Binding(BindingError::UnknownField {
                        trait_kind: kind,
                        field: field.to_owned(),
                    })
                })
            }
        }
    }

    /// The data source id used for a whole-object binding of `object`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownObject`] if the snapshot has no such
    /// object.
    pub fn data_source_id(&self, object: AbstractObjectRef) -> Result<DataSourceId, ResolveError> {
        let plan_id = self
            .state
            .object_id(object)
            .ok_or(ResolveError::UnknownObject(object))?;
        Ok(self
            .remapping
            .lookup(plan_id)
            .map_or(DataSourceId::Abstract(plan_id.id), DataSourceId::Concrete))
    }

    fn resolve_object(
        &self,
        object: AbstractObjectRef,
        declared: ParameterType,
    ) -> Result<ResolvedArgument, ResolveError> {
        let source = self.data_source_id(object)?;
        let handle = self.world.data_source(source);
        if handle.is_none() {
            debug!(
                action = self.action.name(),
                object = %object,
                source = ?source,
                "No data source for object"
            );
        }
        Ok(coerce(handle, declared))
    }

    fn fetch_trait(
        &self,
        object: AbstractObjectRef,
        kind: TraitKind,
    ) -> Result<TraitValue, ResolveError> {
        if self.state.object_id(object).is_none() {
            return Err(ResolveError::UnknownObject(object));
        }
        self.state
            .trait_value(object, kind)
            .ok_or(ResolveError::MissingTrait {
                object,
                trait_kind: kind,
            })
    }
}

/// Coerce a resolved handle to the declared parameter type.
///
/// A missing handle or a missing capability produces
/// [`ResolvedArgument::Absent`] rather than an error.
pub fn coerce(handle: Option<ObjectHandle>, declared: ParameterType) -> ResolvedArgument {
    let Some(handle) = handle else {
        return ResolvedArgument::Absent;
    };
    match declared {
        ParameterType::Object => ResolvedArgument::Object(handle),
        ParameterType::Capability(kind) => match handle.capability(kind) {
            Some(capability) => ResolvedArgument::Capability(capability),
            None => {
                warn!(
                    object = handle.name,
                    capability = kind.name(),
                    "Capability not found on object"
                );
                ResolvedArgument::Absent
            }
        },
        ParameterType::Data => ResolvedArgument::Absent,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use tactic_types::{
        AbstractObjectId, CapabilityKind, Cover, FieldValue, GridPosition, Location, StateData,
        TraitData,
    };
    use tactic_world::{Entity, RuntimeWorld};

    use super::*;

    struct Fixture {
        state: StateData,
        world: RuntimeWorld,
        remapping: IdentifierRemapping,
        key: ActionKey,
    }

    fn fixture() -> Fixture {
        let mut state = StateData::new();
        let soldier = state.add_object(AbstractObjectId::named(3, "Soldier"));
        let spot = state.add_object(AbstractObjectId::named(7, "Crate"));
        state.set_trait(
            spot,
            Location {
                position: GridPosition::new(4, 2),
            },
        );
        state.set_trait(
            spot,
            Cover {
                protection: 50,
                occupied: false,
            },
        );

        let mut world = RuntimeWorld::new();
        world
            .register_proxy(3, Entity::new("Soldier (plan)", &[CapabilityKind::Transform]))
            .unwrap();

        Fixture {
            state,
            world,
            remapping: IdentifierRemapping::new(),
            key: ActionKey::new(ActionKind::TAKE_COVER_ID, vec![soldier, spot]),
        }
    }

    fn resolver(f: &Fixture) -> ParameterResolver<'_> {
        ParameterResolver::new(ActionKind::TakeCover, &f.key, &f.state, &f.remapping, &f.world)
    }

    #[test]
    fn object_without_remapping_resolves_by_abstract_id() {
        let f = fixture();
        let argument = resolver(&f).resolve("Self", ParameterType::Object).unwrap();
        match argument {
            ResolvedArgument::Object(handle) => {
                assert_eq!(handle.source, DataSourceId::Abstract(3));
                assert_eq!(handle.name, "Soldier (plan)");
            }
            other => panic!("expected object handle, got {other:?}"),
        }
    }

    #[test]
    fn object_with_remapping_resolves_by_concrete_id() {
        let mut f = fixture();
        let live = f.world.spawn(Entity::new("Soldier", &[CapabilityKind::Navigator]));
        f.remapping.insert(&AbstractObjectId::new(3), live);

        let argument = resolver(&f).resolve("Self", ParameterType::Object).unwrap();
        match argument {
            ResolvedArgument::Object(handle) => {
                assert_eq!(handle.source, DataSourceId::Concrete(live));
                assert_eq!(handle.name, "Soldier");
            }
            other => panic!("expected object handle, got {other:?}"),
        }
    }

    #[test]
    fn stale_remapping_yields_absent() {
        let mut f = fixture();
        let live = f.world.spawn(Entity::new("Soldier", &[]));
        f.remapping.insert(&AbstractObjectId::new(3), live);
        f.world.despawn(live).unwrap();

        let argument = resolver(&f).resolve("Self", ParameterType::Object).unwrap();
        assert!(argument.is_absent());
    }

    #[test]
    fn capability_coercion() {
        let f = fixture();
        let r = resolver(&f);

        let present = r
            .resolve("Self", ParameterType::Capability(CapabilityKind::Transform))
            .unwrap();
        assert!(matches!(
            present,
            ResolvedArgument::Capability(ref c) if c.kind == CapabilityKind::Transform
        ));

        let missing = r
            .resolve("Self", ParameterType::Capability(CapabilityKind::Navigator))
            .unwrap();
        assert!(missing.is_absent());
    }

    #[test]
    fn data_declared_type_on_object_binding_is_absent() {
        let f = fixture();
        let argument = resolver(&f).resolve("Self", ParameterType::Data).unwrap();
        assert!(argument.is_absent());
    }

    #[test]
    fn object_without_any_data_source_is_absent() {
        let f = fixture();
        let argument = resolver(&f).resolve("CoverSpot", ParameterType::Object).unwrap();
        assert!(argument.is_absent());
    }

    #[test]
    fn trait_binding_equals_snapshot_trait() {
        let f = fixture();
        let spot = f.key.parameter(1).unwrap();
        let argument = resolver(&f).resolve("CoverSpot.Cover", ParameterType::Data).unwrap();
        assert_eq!(
            argument,
            ResolvedArgument::Trait(f.state.trait_value(spot, TraitKind::Cover).unwrap())
        );
    }

    #[test]
    fn field_binding_matches_trait_field() {
        let f = fixture();
        let r = resolver(&f);
        let whole = r.resolve("CoverSpot.Location", ParameterType::Data).unwrap();
        let field = r
            .resolve("CoverSpot.Location.Position", ParameterType::Data)
            .unwrap();

        let ResolvedArgument::Trait(location) = whole else {
            panic!("expected trait, got {whole:?}");
        };
        assert_eq!(
            Some(field),
            location.field("Position").map(ResolvedArgument::Field)
        );
        assert_eq!(
            location,
            Location {
                position: GridPosition::new(4, 2)
            }
            .into_value()
        );
        assert_eq!(
            r.resolve("CoverSpot.Location.Position", ParameterType::Data),
            Ok(ResolvedArgument::Field(FieldValue::Position(GridPosition::new(4, 2))))
        );
    }

    #[test]
    fn missing_trait_is_an_error() {
        let f = fixture();
        let soldier = f.key.parameter(0).unwrap();
        assert_eq!(
            resolver(&f).resolve("Self.Cover", ParameterType::Data),
            Err(ResolveError::MissingTrait {
                object: soldier,
                trait_kind: TraitKind::Cover,
            })
        );
    }

    #[test]
    fn empty_parameter_is_invalid_binding() {
        let f = fixture();
        assert_eq!(
            resolver(&f).resolve("", ParameterType::Object),
            Err(ResolveError::Binding(BindingError::EmptyParameter))
        );
    }

    #[test]
    fn short_action_key_is_missing_parameter() {
        let mut f = fixture();
        f.key.parameters.truncate(1);
        assert_eq!(
            resolver(&f).resolve("CoverSpot.Cover", ParameterType::Data),
            Err(ResolveError::MissingParameter(1))
        );
    }

    #[test]
    fn out_of_range_object_is_unknown() {
        let mut f = fixture();
        f.key.parameters = vec![AbstractObjectRef(0), AbstractObjectRef(9)];
        assert_eq!(
            resolver(&f).resolve("CoverSpot", ParameterType::Object),
            Err(ResolveError::UnknownObject(AbstractObjectRef(9)))
        );
        assert_eq!(
            resolver(&f).resolve("CoverSpot.Location", ParameterType::Data),
            Err(ResolveError::UnknownObject(AbstractObjectRef(9)))
        );
    }
}
