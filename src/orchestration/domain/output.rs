//! Results of external process invocations.

use serde::{Deserialize, Serialize};

/// Captured result of one process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Exit code, absent when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ScriptOutput {
    /// Creates an output record.
    #[must_use]
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns whether the process exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Outcome of a fleet action as reported to the operator.
///
/// A failing script produces an unsuccessful outcome carrying its trimmed
/// standard error, not an error value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the script exited with status zero.
    pub success: bool,
    /// Trimmed standard output.
    pub output: String,
    /// Trimmed standard error of a failed run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ScriptOutput> for ActionOutcome {
    fn from(output: ScriptOutput) -> Self {
        let success = output.success();
        Self {
            success,
            output: output.stdout.trim().to_owned(),
            error: (!success).then(|| output.stderr.trim().to_owned()),
        }
    }
}

impl ActionOutcome {
    /// Serialises the outcome as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialisation fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
