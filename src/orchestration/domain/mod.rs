//! Domain model for fleet script orchestration.

mod action;
mod command;
mod error;
mod output;
mod script;

pub use action::FleetAction;
pub use command::ScriptCommand;
pub use error::OrchestrationDomainError;
pub use output::{ActionOutcome, ScriptOutput};
pub use script::{SCRIPT_EXTENSION, ScriptName};
