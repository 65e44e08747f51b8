//! Demo driver for the tactics plan execution bridge.
//!
//! Loads configuration, builds a small Cover Tactic scenario, and feeds a
//! scripted plan through the [`PlanExecutor`] one action key at a time,
//! the way a decision controller does each time the runtime asks for the
//! next action.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tactics-config.yaml` (or `TACTICS_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the schema registry and the executor
//! 4. Build the scenario and install its identifier remapping
//! 5. Execute each plan step, printing parameter diagnostics as JSON

mod actuator;
mod error;
mod scenario;

use std::path::PathBuf;

use tactic_core::{ActOutcome, ExecutionContext, TacticsConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::actuator::LoggingActuator;
use crate::error::EngineError;

/// Environment variable overriding the configuration file path.
const CONFIG_ENV: &str = "TACTICS_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a plan step fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so this is silent.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!(
        config = %config_path.display(),
        actor = config.executor.actor_name,
        actions = config.actions.len(),
        "tactic-engine starting"
    );

    // 3. Build the executor. This validates every binding expression.
    let mut executor = config.executor().map_err(EngineError::from)?;

    // 4. Build the scenario.
    let scenario = scenario::build()?;
    *executor.remapping_mut() = scenario.remapping;
    executor.set_plan_state(scenario.state_key);

    // 5. Run the plan.
    let mut actuator = LoggingActuator::default();
    let ctx = ExecutionContext {
        states: &scenario.states,
        world: &scenario.world,
    };
    for (step, key) in scenario.plan.iter().enumerate() {
        let info = executor
            .action_parameters_info(&scenario.states, scenario.state_key, key)
            .map_err(EngineError::from)?;
        println!("{}", serde_json::to_string(&info).map_err(EngineError::from)?);

        match executor.act(key, ctx, &mut actuator).map_err(EngineError::from)? {
            ActOutcome::Dispatched {
                action,
                argument_count,
            } => info!(step, action = action.name(), argument_count, "Step dispatched"),
            ActOutcome::Skipped(reason) => warn!(step, ?reason, "Step skipped"),
        }
        executor.clear_current_action();
    }

    info!(started = actuator.started(), "tactic-engine finished");
    Ok(())
}

/// Load configuration from the path in `TACTICS_CONFIG`, falling back to
/// `tactics-config.yaml`. A missing file yields the defaults.
fn load_config() -> Result<(TacticsConfig, PathBuf), EngineError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from("tactics-config.yaml"), PathBuf::from);
    if path.exists() {
        Ok((TacticsConfig::from_file(&path)?, path))
    } else {
        Ok((TacticsConfig::default(), path))
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &TacticsConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
