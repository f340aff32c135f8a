//! Port contracts for fleet orchestration.

mod runner;

pub use runner::{ScriptRunner, ScriptRunnerError, ScriptRunnerResult};
