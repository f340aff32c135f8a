//! Script runner backed by `std::process`.

use crate::orchestration::{
    domain::{ScriptCommand, ScriptOutput},
    ports::{ScriptRunner, ScriptRunnerError, ScriptRunnerResult},
};
use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands as child processes with captured output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessScriptRunner;

impl ProcessScriptRunner {
    /// Creates the runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ScriptRunner for ProcessScriptRunner {
    fn execute(&self, command: &ScriptCommand) -> ScriptRunnerResult<ScriptOutput> {
        let mut process = Command::new(command.program());
        process
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = command.working_dir() {
            process.current_dir(dir);
        }

        debug!(command = %command, "running process");
        let output = process.output().map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ScriptRunnerError::NotFound(command.program().to_owned())
            } else {
                ScriptRunnerError::spawn(command.program(), err)
            }
        })?;

        Ok(ScriptOutput::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}
