//! An actuator that logs what it is asked to do.

use tactic_core::{ActionSchema, Actuator};
use tactic_types::ResolvedArgument;
use tracing::info;

/// Logs every started action and keeps a count.
#[derive(Debug, Default)]
pub struct LoggingActuator {
    started: usize,
}

impl LoggingActuator {
    /// Number of actions started so far.
    pub const fn started(&self) -> usize {
        self.started
    }
}

impl Actuator for LoggingActuator {
    fn start_action(&mut self, schema: &ActionSchema, arguments: Vec<ResolvedArgument>) {
        self.started = self.started.saturating_add(1);
        for (index, argument) in arguments.iter().enumerate() {
            info!(
                action = schema.action().name(),
                index,
                argument = describe(argument),
                "Actuator argument"
            );
        }
    }
}

fn describe(argument: &ResolvedArgument) -> String {
    match argument {
        ResolvedArgument::Object(handle) => format!("object '{}'", handle.name),
        ResolvedArgument::Capability(capability) => {
            format!("{} on '{}'", capability.kind.name(), capability.owner_name)
        }
        ResolvedArgument::Trait(value) => format!("trait {value:?}"),
        ResolvedArgument::Field(value) => format!("field {value:?}"),
        ResolvedArgument::Absent => String::from("absent"),
    }
}
