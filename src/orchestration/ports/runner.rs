//! Port for running external processes.

use crate::orchestration::domain::{ScriptCommand, ScriptOutput};
use std::sync::Arc;
use thiserror::Error;

/// Result type for script runner operations.
pub type ScriptRunnerResult<T> = Result<T, ScriptRunnerError>;

/// Runs a command to completion and captures its output.
pub trait ScriptRunner: Send + Sync {
    /// Executes `command` and waits for it to exit.
    ///
    /// A non-zero exit status is reported through [`ScriptOutput`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptRunnerError`] when the process cannot be started.
    fn execute(&self, command: &ScriptCommand) -> ScriptRunnerResult<ScriptOutput>;
}

/// Errors returned by script runner adapters.
#[derive(Debug, Clone, Error)]
pub enum ScriptRunnerError {
    /// The program does not exist.
    #[error("program not found: {0}")]
    NotFound(String),

    /// The process could not be started or awaited.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ScriptRunnerError {
    /// Wraps a failure to start `program`.
    pub fn spawn(
        program: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Spawn {
            program: program.into(),
            source: Arc::new(err),
        }
    }
}
