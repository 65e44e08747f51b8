//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `tactics-config.yaml` at the
//! project root. It names the decision controller, holds the authored
//! action schemas (binding expressions and declared parameter types), and
//! sets the default log level. Every section falls back to defaults that
//! match the built-in Cover Tactic schemas.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tactic_types::{ActionKind, ParameterType};

use crate::classifier::ActionClassifier;
use crate::executor::PlanExecutor;
use crate::schema::{ActionSchema, SchemaError, SchemaRegistry};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An `actions` entry names an action the domain does not have.
    #[error("unknown action '{0}' in config")]
    UnknownAction(String),

    /// A declared parameter type is not `Object`, `Data`, or a capability.
    #[error("unknown parameter type '{name}' for action '{action}'")]
    UnknownParameterType {
        /// The action entry.
        action: ActionKind,
        /// The unrecognized type name.
        name: String,
    },

    /// A schema is malformed.
    #[error("invalid action schema: {source}")]
    Schema {
        /// The underlying schema error.
        #[from]
        source: SchemaError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TacticsConfig {
    /// Executor settings.
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Authored schemas keyed by action name.
    #[serde(default = "default_actions")]
    pub actions: BTreeMap<String, ActionSchemaConfig>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            executor: ExecutorConfig::default(),
            actions: default_actions(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TacticsConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Build the schema registry from the `actions` section and check
    /// every binding expression once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAction`],
    /// [`ConfigError::UnknownParameterType`], or [`ConfigError::Schema`].
    pub fn schema_registry(&self) -> Result<SchemaRegistry, ConfigError> {
        let mut registry = SchemaRegistry::new();
        for (name, entry) in &self.actions {
            let action =
                ActionKind::from_name(name).ok_or_else(|| ConfigError::UnknownAction(name.clone()))?;
            let parameter_types = entry
                .parameter_types
                .iter()
                .map(|type_name| {
                    ParameterType::from_name(type_name).ok_or_else(|| {
                        ConfigError::UnknownParameterType {
                            action,
                            name: type_name.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            registry.register(ActionSchema::new(
                action,
                entry.arguments.iter().cloned(),
                parameter_types,
            )?);
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Build a Cover Tactic executor from this configuration.
    ///
    /// # Errors
    ///
    /// See [`schema_registry`](Self::schema_registry).
    pub fn executor(&self) -> Result<PlanExecutor, ConfigError> {
        Ok(PlanExecutor::new(
            self.executor.actor_name.clone(),
            ActionClassifier::cover_tactic(),
            self.schema_registry()?,
        ))
    }
}

/// Executor settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutorConfig {
    /// Display name of the decision controller, used in error messages.
    #[serde(default = "default_actor_name")]
    pub actor_name: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            actor_name: default_actor_name(),
        }
    }
}

/// One authored action schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionSchemaConfig {
    /// Binding expressions, one per actuator argument.
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Declared runtime type per argument: `Object`, `Data`, or a
    /// capability name.
    #[serde(default)]
    pub parameter_types: Vec<String>,
}

impl ActionSchemaConfig {
    fn new(arguments: &[&str], parameter_types: &[&str]) -> Self {
        Self {
            arguments: arguments.iter().map(|s| (*s).to_owned()).collect(),
            parameter_types: parameter_types.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_actor_name() -> String {
    "DecisionController".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_actions() -> BTreeMap<String, ActionSchemaConfig> {
    BTreeMap::from([
        (
            "PickupWeapon".to_owned(),
            ActionSchemaConfig::new(&["Agent", "Weapon"], &["WeaponHolder", "Object"]),
        ),
        (
            "TakeCover".to_owned(),
            ActionSchemaConfig::new(&["Self", "CoverSpot.Location.Position"], &["Object", "Data"]),
        ),
        (
            "SkipTurn".to_owned(),
            ActionSchemaConfig::new(&["Agent"], &["Object"]),
        ),
    ])
}
