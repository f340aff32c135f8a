//! External process invocations.

use super::FleetAction;
use crate::project_registry::domain::ProjectName;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Program, arguments and working directory of one external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<Utf8PathBuf>,
}

impl ScriptCommand {
    /// Creates a command running `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Builds the fleet script invocation
    /// `<script> <action> --json [--pretty] [--project <name>]`.
    #[must_use]
    pub fn fleet(
        script: &Utf8Path,
        action: FleetAction,
        project: Option<&ProjectName>,
        pretty: bool,
    ) -> Self {
        let command = Self::new(script.as_str())
            .arg(action.as_str())
            .arg("--json");
        let with_pretty = if pretty { command.arg("--pretty") } else { command };
        match project {
            Some(name) => with_pretty.arg("--project").arg(name.as_str()),
            None => with_pretty,
        }
    }

    /// Builds `git rev-parse HEAD`.
    #[must_use]
    pub fn git_head() -> Self {
        Self::new("git").arg("rev-parse").arg("HEAD")
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Runs the command from `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Returns the program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the working directory, if one was set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Utf8Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.program)?;
        for arg in &self.args {
            write!(formatter, " {arg}")?;
        }
        Ok(())
    }
}
