//! The plan executor: classify, look up, resolve, dispatch.
//!
//! One decision step runs `Idle -> Classifying -> SchemaLookup ->
//! Resolving -> Dispatching -> Idle` inside a single synchronous
//! [`PlanExecutor::act`] call. Callers must serialize `act` calls on one
//! executor; the snapshot and the identifier remapping are read-only for
//! the duration of a call.

use chrono::{DateTime, Utc};
use tactic_types::{
    ActionKey, ActionKind, ActionKindId, ActionParameterInfo, DataSourceResolver, ParameterType,
    ResolvedArgument, StateKey, StateProvider,
};
use tracing::{debug, info, warn};

use crate::classifier::ActionClassifier;
use crate::error::ExecutionError;
use crate::remap::IdentifierRemapping;
use crate::resolver::ParameterResolver;
use crate::schema::{ActionSchema, SchemaRegistry};

/// Performs a resolved action in the runtime.
pub trait Actuator {
    /// Start `schema`'s action with fully resolved arguments, one per
    /// binding expression, in declaration order.
    fn start_action(&mut self, schema: &ActionSchema, arguments: Vec<ResolvedArgument>);
}

/// Collaborators read during one `act` call.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Looks plan state snapshots up by key.
    pub states: &'a dyn StateProvider,
    /// Resolves data source ids to runtime object handles.
    pub world: &'a dyn DataSourceResolver,
}

/// Why an action key was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The action kind id is not in the classifier table.
    UnknownActionKind(ActionKindId),
    /// The action was classified but has no registered schema.
    MissingSchema(ActionKind),
}

/// Result of one `act` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActOutcome {
    /// The actuator was invoked.
    Dispatched {
        /// The action that was started.
        action: ActionKind,
        /// Number of arguments passed to the actuator.
        argument_count: usize,
    },
    /// Nothing was dispatched. Callers should surface this as a warning.
    Skipped(SkipReason),
}

/// The action key most recently dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAction {
    /// The dispatched key.
    pub key: ActionKey,
    /// Its classified action kind.
    pub action: ActionKind,
    /// When it was dispatched.
    pub started_at: DateTime<Utc>,
}

/// Executes planner-chosen action keys against the runtime world.
#[derive(Debug, Clone)]
pub struct PlanExecutor {
    actor: String,
    classifier: ActionClassifier,
    registry: SchemaRegistry,
    remapping: IdentifierRemapping,
    plan_state: Option<StateKey>,
    current_action: Option<ActiveAction>,
}

impl PlanExecutor {
    /// Create an executor for the decision controller named `actor`.
    pub fn new(actor: impl Into<String>, classifier: ActionClassifier, registry: SchemaRegistry) -> Self {
        Self {
            actor: actor.into(),
            classifier,
            registry,
            remapping: IdentifierRemapping::new(),
            plan_state: None,
            current_action: None,
        }
    }

    /// Name of the decision controller, used in error messages.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// The schema registry.
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The identifier remapping.
    pub const fn remapping(&self) -> &IdentifierRemapping {
        &self.remapping
    }

    /// Mutable access for the world-sync process, between `act` calls.
    pub fn remapping_mut(&mut self) -> &mut IdentifierRemapping {
        &mut self.remapping
    }

    /// Set the plan state `act` reads from.
    pub fn set_plan_state(&mut self, key: StateKey) {
        self.plan_state = Some(key);
    }

    /// The plan state `act` reads from.
    pub const fn plan_state(&self) -> Option<StateKey> {
        self.plan_state
    }

    /// The action key most recently dispatched, if not cleared.
    pub const fn current_action(&self) -> Option<&ActiveAction> {
        self.current_action.as_ref()
    }

    /// Forget the current action, for example once the actuator reports
    /// completion or the caller cancels it.
    pub fn clear_current_action(&mut self) -> Option<ActiveAction> {
        self.current_action.take()
    }

    /// Human-readable action name for `key`, or `None` if unknown.
    pub fn action_name(&self, key: &ActionKey) -> Option<&'static str> {
        self.classifier.classify(key).map(ActionKind::name)
    }

    /// Execute one action key.
    ///
    /// Unknown action kinds and actions without a schema are skipped
    /// without invoking the actuator.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidBinding`] when a binding expression
    /// does not fit the action, [`ExecutionError::Resolution`] when the
    /// action key or snapshot does not hold what a binding points at, and
    /// [`ExecutionError::NoPlanState`] / [`ExecutionError::StateNotFound`]
    /// when there is no snapshot to read. The actuator is not invoked on
    /// error.
    pub fn act(
        &mut self,
        key: &ActionKey,
        ctx: ExecutionContext<'_>,
        actuator: &mut dyn Actuator,
    ) -> Result<ActOutcome, ExecutionError> {
        let Some(action) = self.classifier.classify(key) else {
            warn!(action_id = %key.action_id, actor = self.actor, "Unknown action kind, skipping");
            return Ok(ActOutcome::Skipped(SkipReason::UnknownActionKind(key.action_id)));
        };

        let Some(schema) = self.registry.schema(action) else {
            warn!(action = action.name(), actor = self.actor, "No schema for action, skipping");
            return Ok(ActOutcome::Skipped(SkipReason::MissingSchema(action)));
        };

        let state_key = self.plan_state.ok_or(ExecutionError::NoPlanState)?;
        let state = ctx
            .states
            .state_data(state_key)
            .ok_or(ExecutionError::StateNotFound(state_key))?;

        let resolver = ParameterResolver::new(action, key, state, &self.remapping, ctx.world);
        let mut arguments = Vec::with_capacity(schema.argument_count());
        for (index, expression) in schema.arguments().iter().enumerate() {
            let declared = schema.declared_type(index).unwrap_or(ParameterType::Data);
            let argument = resolver
                .resolve(expression, declared)
                .map_err(|e| e.into_execution(action, &self.actor, expression))?;
            debug!(
                action = action.name(),
                index,
                expression = expression.as_str(),
                absent = argument.is_absent(),
                "Argument resolved"
            );
            arguments.push(argument);
        }

        self.current_action = Some(ActiveAction {
            key: key.clone(),
            action,
            started_at: Utc::now(),
        });

        let argument_count = arguments.len();
        info!(
            action = action.name(),
            actor = self.actor,
            argument_count,
            "Dispatching action"
        );
        actuator.start_action(schema, arguments);

        Ok(ActOutcome::Dispatched {
            action,
            argument_count,
        })
    }

    /// Describe each formal parameter of `key` against the snapshot at
    /// `state_key`, without executing anything.
    ///
    /// Works for any previously produced key/state pair. Unknown action
    /// kinds describe no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::StateNotFound`] if the snapshot is gone,
    /// [`ExecutionError::MissingParameter`] if the key binds fewer objects
    /// than the action declares, and [`ExecutionError::UnknownObject`] if a
    /// bound object is not in the snapshot.
    pub fn action_parameters_info(
        &self,
        states: &dyn StateProvider,
        state_key: StateKey,
        key: &ActionKey,
    ) -> Result<Vec<ActionParameterInfo>, ExecutionError> {
        let state = states
            .state_data(state_key)
            .ok_or(ExecutionError::StateNotFound(state_key))?;
        let Some(action) = self.classifier.classify(key) else {
            return Ok(Vec::new());
        };

        action
            .parameter_names()
            .iter()
            .enumerate()
            .map(|(index, name)| -> Result<ActionParameterInfo, ExecutionError> {
                let object = key
                    .parameter(index)
                    .ok_or(ExecutionError::MissingParameter { action, index })?;
                let id = state
                    .object_id(object)
                    .ok_or(ExecutionError::UnknownObject { action, object })?;
                Ok(ActionParameterInfo {
                    parameter_name: (*name).to_owned(),
                    object_display_name: id.display_name(),
                    object_stable_id: id.id,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tactic_types::{AbstractObjectId, AbstractObjectRef, StateData, StateStore};
    use tactic_world::RuntimeWorld;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(ActionKind, Vec<ResolvedArgument>)>,
    }

    impl Actuator for Recorder {
        fn start_action(&mut self, schema: &ActionSchema, arguments: Vec<ResolvedArgument>) {
            self.calls.push((schema.action(), arguments));
        }
    }

    fn executor() -> PlanExecutor {
        PlanExecutor::new(
            "Soldier",
            ActionClassifier::cover_tactic(),
            SchemaRegistry::cover_tactic().unwrap(),
        )
    }

    #[test]
    fn unknown_action_kind_is_skipped() {
        let mut exec = executor();
        let states = StateStore::new();
        let world = RuntimeWorld::new();
        let mut recorder = Recorder::default();
        let key = ActionKey::new(ActionKindId::new(), Vec::new());

        let outcome = exec.act(
            &key,
            ExecutionContext {
                states: &states,
                world: &world,
            },
            &mut recorder,
        );
        assert_eq!(
            outcome,
            Ok(ActOutcome::Skipped(SkipReason::UnknownActionKind(key.action_id)))
        );
        assert!(recorder.calls.is_empty());
        assert!(exec.current_action().is_none());
        assert_eq!(exec.action_name(&key), None);
    }

    #[test]
    fn missing_schema_is_skipped() {
        let mut exec = PlanExecutor::new("Soldier", ActionClassifier::cover_tactic(), SchemaRegistry::new());
        let states = StateStore::new();
        let world = RuntimeWorld::new();
        let mut recorder = Recorder::default();
        let key = ActionKey::new(ActionKind::SKIP_TURN_ID, vec![AbstractObjectRef(0)]);

        let outcome = exec.act(
            &key,
            ExecutionContext {
                states: &states,
                world: &world,
            },
            &mut recorder,
        );
        assert_eq!(
            outcome,
            Ok(ActOutcome::Skipped(SkipReason::MissingSchema(ActionKind::SkipTurn)))
        );
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn act_without_plan_state_fails() {
        let mut exec = executor();
        let states = StateStore::new();
        let world = RuntimeWorld::new();
        let mut recorder = Recorder::default();
        let key = ActionKey::new(ActionKind::SKIP_TURN_ID, vec![AbstractObjectRef(0)]);
        let ctx = ExecutionContext {
            states: &states,
            world: &world,
        };

        assert_eq!(exec.act(&key, ctx, &mut recorder), Err(ExecutionError::NoPlanState));

        let missing = StateKey::new();
        exec.set_plan_state(missing);
        assert_eq!(
            exec.act(&key, ctx, &mut recorder),
            Err(ExecutionError::StateNotFound(missing))
        );
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn dispatch_records_current_action() {
        let mut exec = executor();
        let mut states = StateStore::new();
        let mut data = StateData::new();
        let agent = data.add_object(AbstractObjectId::named(1, "Soldier"));
        let state_key = states.insert(data);
        let world = RuntimeWorld::new();
        let mut recorder = Recorder::default();
        let key = ActionKey::new(ActionKind::SKIP_TURN_ID, vec![agent]);

        exec.set_plan_state(state_key);
        let outcome = exec.act(
            &key,
            ExecutionContext {
                states: &states,
                world: &world,
            },
            &mut recorder,
        );
        assert_eq!(
            outcome,
            Ok(ActOutcome::Dispatched {
                action: ActionKind::SkipTurn,
                argument_count: 1,
            })
        );
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(exec.current_action().map(|a| &a.key), Some(&key));
        assert!(exec.clear_current_action().is_some());
        assert!(exec.current_action().is_none());
    }

    #[test]
    fn parameters_info_uses_names_and_ids() {
        let exec = executor();
        let mut states = StateStore::new();
        let mut data = StateData::new();
        let agent = data.add_object(AbstractObjectId::named(3, "Soldier"));
        let rifle = data.add_object(AbstractObjectId::new(12));
        let state_key = states.insert(data);
        let key = ActionKey::new(ActionKind::PICKUP_WEAPON_ID, vec![agent, rifle]);

        let info = exec.action_parameters_info(&states, state_key, &key).unwrap();
        assert_eq!(
            info,
            vec![
                ActionParameterInfo {
                    parameter_name: String::from("Agent"),
                    object_display_name: String::from("Soldier"),
                    object_stable_id: 3,
                },
                ActionParameterInfo {
                    parameter_name: String::from("Weapon"),
                    object_display_name: String::from("TraitBasedObject#12"),
                    object_stable_id: 12,
                },
            ]
        );
    }

    #[test]
    fn parameters_info_for_unknown_action_is_empty() {
        let exec = executor();
        let mut states = StateStore::new();
        let state_key = states.insert(StateData::new());
        let key = ActionKey::new(ActionKindId::new(), vec![AbstractObjectRef(0)]);
        assert_eq!(exec.action_parameters_info(&states, state_key, &key), Ok(Vec::new()));
    }

    #[test]
    fn parameters_info_reports_short_keys() {
        let exec = executor();
        let mut states = StateStore::new();
        let mut data = StateData::new();
        let agent = data.add_object(AbstractObjectId::new(3));
        let state_key = states.insert(data);
        let key = ActionKey::new(ActionKind::PICKUP_WEAPON_ID, vec![agent]);
        assert_eq!(
            exec.action_parameters_info(&states, state_key, &key),
            Err(ExecutionError::MissingParameter {
                action: ActionKind::PickupWeapon,
                index: 1,
            })
        );
    }
}
