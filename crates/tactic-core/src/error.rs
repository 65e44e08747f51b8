//! Error types for the execution bridge.
//!
//! Classification misses are not errors here: [`PlanExecutor::act`]
//! reports them as a skipped outcome. Everything in this module is a
//! contract violation between the authored schemas, the planner, and the
//! state snapshot, and is propagated to the caller.
//!
//! [`PlanExecutor::act`]: crate::executor::PlanExecutor::act

use tactic_types::{AbstractObjectRef, ActionKind, StateKey, TraitKind};

/// Why a binding expression could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The first segment is empty.
    #[error("formal parameter name is empty")]
    EmptyParameter,

    /// The first segment does not name a formal parameter of the action.
    #[error("'{0}' is not a formal parameter")]
    UnknownParameter(String),

    /// The expression has more than three segments.
    #[error("expected 1 to 3 segments, found {0}")]
    SegmentCount(usize),

    /// The second segment is not a known trait.
    #[error("'{0}' is not a known trait")]
    UnknownTrait(String),

    /// The third segment is not a field of the trait.
    #[error("trait {trait_kind} has no field '{field}'")]
    UnknownField {
        /// The trait that was named.
        trait_kind: TraitKind,
        /// The field that was requested.
        field: String,
    },
}

/// Failures while resolving one argument, before action context is added.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The binding expression is malformed.
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// The action key has no object for the formal parameter.
    #[error("action key has no object for parameter {0}")]
    MissingParameter(usize),

    /// The object reference is outside the snapshot's object table.
    #[error("{0} is not in the plan state")]
    UnknownObject(AbstractObjectRef),

    /// The object does not carry the requested trait.
    #[error("{object} has no {trait_kind} trait")]
    MissingTrait {
        /// The object that was inspected.
        object: AbstractObjectRef,
        /// The trait that was requested.
        trait_kind: TraitKind,
    },
}

/// Hard failures of the plan executor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// A binding expression does not fit the action it is attached to.
    #[error("argument '{expression}' to the '{action}' callback on '{actor}' is invalid: {reason}")]
    InvalidBinding {
        /// The action being executed.
        action: ActionKind,
        /// The decision controller that authored the binding.
        actor: String,
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: BindingError,
    },

    /// The action key or the snapshot does not match the action's
    /// parameter list.
    #[error("cannot resolve argument '{expression}' to the '{action}' callback: {source}")]
    Resolution {
        /// The action being executed.
        action: ActionKind,
        /// The expression being resolved.
        expression: String,
        /// The underlying failure.
        source: ResolveError,
    },

    /// The action key does not bind the formal parameter being described.
    #[error("action key for '{action}' has no object for parameter {index}")]
    MissingParameter {
        /// The action being described.
        action: ActionKind,
        /// The formal parameter index.
        index: usize,
    },

    /// The object bound to a parameter is not in the plan state.
    #[error("{object} bound by '{action}' is not in the plan state")]
    UnknownObject {
        /// The action being described.
        action: ActionKind,
        /// The object reference.
        object: AbstractObjectRef,
    },

    /// `act` was called before any plan state was set.
    #[error("no current plan state")]
    NoPlanState,

    /// The state provider has no snapshot for the key.
    #[error("plan state not found: {0}")]
    StateNotFound(StateKey),
}

impl ResolveError {
    /// Attach action context, keeping binding problems distinguishable.
    pub fn into_execution(self, action: ActionKind, actor: &str, expression: &str) -> ExecutionError {
        match self {
            Self::Binding(reason) => ExecutionError::InvalidBinding {
                action,
                actor: actor.to_owned(),
                expression: expression.to_owned(),
                reason,
            },
            source => ExecutionError::Resolution {
                action,
                expression: expression.to_owned(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_errors_become_invalid_binding() {
        let err = ResolveError::Binding(BindingError::EmptyParameter).into_execution(
            ActionKind::TakeCover,
            "Soldier",
            ".Location",
        );
        assert_eq!(
            err.to_string(),
            "argument '.Location' to the 'TakeCover' callback on 'Soldier' is invalid: \
             formal parameter name is empty"
        );
    }

    #[test]
    fn other_errors_keep_their_source() {
        let err = ResolveError::MissingParameter(1).into_execution(
            ActionKind::TakeCover,
            "Soldier",
            "CoverSpot",
        );
        assert!(matches!(
            err,
            ExecutionError::Resolution {
                source: ResolveError::MissingParameter(1),
                ..
            }
        ));
    }
}
