//! Plan execution bridge for the tactics planner.
//!
//! Given an action key chosen by the planner and the plan state it was
//! chosen in, this crate classifies the action, resolves each authored
//! binding expression into a typed argument, and dispatches the actuator.
//!
//! # Modules
//!
//! - [`binding`] -- Parsing of dotted binding expressions.
//! - [`classifier`] -- [`ActionClassifier`]: action kind id to action kind.
//! - [`config`] -- Configuration loading from `tactics-config.yaml`.
//! - [`error`] -- Error types for resolution and execution.
//! - [`executor`] -- [`PlanExecutor`], the [`Actuator`] seam, and
//!   parameter introspection.
//! - [`remap`] -- [`IdentifierRemapping`] from abstract to concrete ids.
//! - [`resolver`] -- [`ParameterResolver`], the argument resolution core.
//! - [`schema`] -- [`ActionSchema`] and the [`SchemaRegistry`].

pub mod binding;
pub mod classifier;
pub mod config;
pub mod error;
pub mod executor;
pub mod remap;
pub mod resolver;
pub mod schema;

// Re-export primary types at crate root for convenience.
pub use binding::{BindingExpression, BindingTarget};
pub use classifier::ActionClassifier;
pub use config::{ConfigError, TacticsConfig};
pub use error::{BindingError, ExecutionError, ResolveError};
pub use executor::{ActOutcome, ActiveAction, Actuator, ExecutionContext, PlanExecutor, SkipReason};
pub use remap::IdentifierRemapping;
pub use resolver::ParameterResolver;
pub use schema::{ActionSchema, SchemaError, SchemaRegistry};
