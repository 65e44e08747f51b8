//! Action schemas and the registry that holds them.
//!
//! A schema is what a decision controller authors for one action: the
//! binding expression for each actuator argument and the runtime type the
//! actuator declares for it. Formal parameter names come from the
//! generated tables on [`ActionKind`]; the registry exposes both.

use std::collections::BTreeMap;

use tactic_types::{ActionKind, CapabilityKind, ParameterType};

use crate::binding::BindingExpression;
use crate::error::BindingError;

/// Errors raised while building or validating schemas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Every argument needs exactly one declared type.
    #[error("schema for '{action}' has {arguments} arguments but {parameter_types} parameter types")]
    ArgumentTypeMismatch {
        /// The action the schema belongs to.
        action: ActionKind,
        /// Number of binding expressions.
        arguments: usize,
        /// Number of declared types.
        parameter_types: usize,
    },

    /// A binding expression does not parse against the action.
    #[error("argument '{expression}' to the '{action}' callback is invalid: {reason}")]
    InvalidBinding {
        /// The action the schema belongs to.
        action: ActionKind,
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: BindingError,
    },
}

/// The authored execution info for one action kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    action: ActionKind,
    arguments: Vec<String>,
    parameter_types: Vec<ParameterType>,
}

impl ActionSchema {
    /// Create a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ArgumentTypeMismatch`] if the argument and
    /// type lists differ in length.
    pub fn new<S: Into<String>>(
        action: ActionKind,
        arguments: impl IntoIterator<Item = S>,
        parameter_types: Vec<ParameterType>,
    ) -> Result<Self, SchemaError> {
        let arguments: Vec<String> = arguments.into_iter().map(Into::into).collect();
        if arguments.len() != parameter_types.len() {
            return Err(SchemaError::ArgumentTypeMismatch {
                action,
                arguments: arguments.len(),
                parameter_types: parameter_types.len(),
            });
        }
        Ok(Self {
            action,
            arguments,
            parameter_types,
        })
    }

    /// The action this schema executes.
    pub const fn action(&self) -> ActionKind {
        self.action
    }

    /// Binding expressions, one per actuator argument.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Number of actuator arguments.
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// Declared runtime type of argument `index`.
    pub fn declared_type(&self, index: usize) -> Option<ParameterType> {
        self.parameter_types.get(index).copied()
    }

    /// Parse every binding expression once.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidBinding`] for the first expression
    /// that does not parse.
    pub fn compile(&self) -> Result<Vec<BindingExpression>, SchemaError> {
        self.arguments
            .iter()
            .map(|expression| {
                BindingExpression::parse(expression, self.action).map_err(|reason| {
                    SchemaError::InvalidBinding {
                        action: self.action,
                        expression: expression.clone(),
                        reason,
                    }
                })
            })
            .collect()
    }
}

/// Registry of action schemas, constant after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    schemas: BTreeMap<ActionKind, ActionSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// The default schemas of the Cover Tactic decision controller.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in tables; the `Result` mirrors
    /// [`ActionSchema::new`].
    pub fn cover_tactic() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.register(ActionSchema::new(
            ActionKind::PickupWeapon,
            ["Agent", "Weapon"],
            vec![
                ParameterType::Capability(CapabilityKind::WeaponHolder),
                ParameterType::Object,
            ],
        )?);
        registry.register(ActionSchema::new(
            ActionKind::TakeCover,
            ["Self", "CoverSpot.Location.Position"],
            vec![ParameterType::Object, ParameterType::Data],
        )?);
        registry.register(ActionSchema::new(
            ActionKind::SkipTurn,
            ["Agent"],
            vec![ParameterType::Object],
        )?);
        Ok(registry)
    }

    /// Register a schema, replacing any previous one for the same action.
    pub fn register(&mut self, schema: ActionSchema) -> Option<ActionSchema> {
        self.schemas.insert(schema.action, schema)
    }

    /// The schema registered for `action`.
    pub fn schema(&self, action: ActionKind) -> Option<&ActionSchema> {
        self.schemas.get(&action)
    }

    /// Formal parameter names of `action`. Empty is a valid answer.
    #[allow(clippy::unused_self)] // Parameter tables are generated onto `ActionKind`.
    pub const fn parameter_names(&self, action: ActionKind) -> &'static [&'static str] {
        action.parameter_names()
    }

    /// Index of the formal parameter `name` of `action`.
    #[allow(clippy::unused_self)]
    pub fn parameter_index(&self, action: ActionKind, name: &str) -> Option<usize> {
        action.parameter_index(name)
    }

    /// Declared runtime type of argument `index` of `action`.
    pub fn declared_type(&self, action: ActionKind, index: usize) -> Option<ParameterType> {
        self.schema(action)
            .and_then(|schema| schema.declared_type(index))
    }

    /// Parse every registered binding expression once.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError::InvalidBinding`] found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for schema in self.schemas.values() {
            schema.compile()?;
        }
        Ok(())
    }

    /// Iterate over the registered action kinds.
    pub fn actions(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.schemas.keys().copied()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
