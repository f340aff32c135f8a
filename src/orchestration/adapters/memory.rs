//! Script runner replaying prepared outputs.

use crate::orchestration::{
    domain::{ScriptCommand, ScriptOutput},
    ports::{ScriptRunner, ScriptRunnerError, ScriptRunnerResult},
};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// Runner that records every command and answers from a queue.
///
/// When the queue is empty the command is reported as not found.
#[derive(Debug, Clone, Default)]
pub struct RecordingScriptRunner {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    responses: VecDeque<ScriptRunnerResult<ScriptOutput>>,
    commands: Vec<ScriptCommand>,
}

impl RecordingScriptRunner {
    /// Creates a runner with no prepared responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the result returned by the next execution.
    pub fn push_response(&self, response: ScriptRunnerResult<ScriptOutput>) {
        self.lock().responses.push_back(response);
    }

    /// Queues a process exit with the given streams.
    pub fn push_exit(&self, exit_code: i32, stdout: &str, stderr: &str) {
        self.push_response(Ok(ScriptOutput::new(Some(exit_code), stdout, stderr)));
    }

    /// Queues a failure to start the process.
    pub fn push_spawn_failure(&self, program: &str) {
        self.push_response(Err(ScriptRunnerError::spawn(
            program,
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        )));
    }

    /// Returns the commands executed so far.
    #[must_use]
    pub fn commands(&self) -> Vec<ScriptCommand> {
        self.lock().commands.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScriptRunner for RecordingScriptRunner {
    fn execute(&self, command: &ScriptCommand) -> ScriptRunnerResult<ScriptOutput> {
        let mut state = self.lock();
        state.commands.push(command.clone());
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ScriptRunnerError::NotFound(command.program().to_owned())))
    }
}
