//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the scripted
//! plan run so that `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tactic_core::ConfigError,
    },

    /// Executing a plan step failed.
    #[error("execution error: {source}")]
    Execution {
        /// The underlying execution error.
        #[from]
        source: tactic_core::ExecutionError,
    },

    /// Building the runtime world failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: tactic_world::WorldError,
    },

    /// Serializing diagnostics failed.
    #[error("serialization error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },
}
