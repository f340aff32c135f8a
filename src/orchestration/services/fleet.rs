//! Service layer wrapping the fleet script and repository metadata.

use crate::orchestration::{
    domain::{ActionOutcome, FleetAction, OrchestrationDomainError, ScriptCommand, ScriptName},
    ports::{ScriptRunner, ScriptRunnerError},
};
use crate::project_registry::domain::ProjectName;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name of the fleet script inside the scripts directory.
pub const FLEET_SCRIPT_NAME: &str = "mose.sh";

/// Commit reported when the repository revision cannot be determined.
pub const UNKNOWN_COMMIT: &str = "unknown";

/// Service-level errors for fleet orchestration.
#[derive(Debug, Error)]
pub enum FleetScriptServiceError {
    /// Domain validation failed before any process was started.
    #[error(transparent)]
    Domain(#[from] OrchestrationDomainError),

    /// The process could not be started.
    #[error(transparent)]
    Runner(#[from] ScriptRunnerError),
}

/// Result type for fleet script service operations.
pub type FleetScriptServiceResult<T> = Result<T, FleetScriptServiceError>;

/// Runs fleet actions, helper scripts and repository queries.
#[derive(Clone)]
pub struct FleetScriptService<R>
where
    R: ScriptRunner,
{
    runner: Arc<R>,
    scripts_dir: Utf8PathBuf,
    repository_dir: Utf8PathBuf,
}

impl<R> FleetScriptService<R>
where
    R: ScriptRunner,
{
    /// Creates a service using the scripts in `scripts_dir` and the git
    /// checkout at `repository_dir`.
    #[must_use]
    pub fn new(
        runner: Arc<R>,
        scripts_dir: impl Into<Utf8PathBuf>,
        repository_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            runner,
            scripts_dir: scripts_dir.into(),
            repository_dir: repository_dir.into(),
        }
    }

    /// Returns the fleet script location.
    #[must_use]
    pub fn fleet_script(&self) -> Utf8PathBuf {
        self.scripts_dir.join(FLEET_SCRIPT_NAME)
    }

    /// Returns the scripts directory.
    #[must_use]
    pub fn scripts_dir(&self) -> &Utf8Path {
        &self.scripts_dir
    }

    /// Runs a fleet action, optionally limited to one project.
    ///
    /// # Errors
    ///
    /// Returns [`FleetScriptServiceError::Runner`] when the fleet script
    /// cannot be started. A script that exits non-zero yields an
    /// unsuccessful [`ActionOutcome`].
    pub fn run_action(
        &self,
        action: FleetAction,
        project: Option<&ProjectName>,
        pretty: bool,
    ) -> FleetScriptServiceResult<ActionOutcome> {
        let command = ScriptCommand::fleet(&self.fleet_script(), action, project, pretty)
            .current_dir(self.repository_dir.clone());
        let outcome = ActionOutcome::from(self.runner.execute(&command)?);
        if outcome.success {
            info!(action = %action, project = project.map(ProjectName::as_str), "fleet action succeeded");
        } else {
            warn!(action = %action, project = project.map(ProjectName::as_str), "fleet action failed");
        }
        Ok(outcome)
    }

    /// Parses `action` and runs it.
    ///
    /// # Errors
    ///
    /// Returns [`FleetScriptServiceError::Domain`] for unknown actions
    /// without starting a process, and runner errors as for
    /// [`Self::run_action`].
    pub fn run_named_action(
        &self,
        action: &str,
        project: Option<&ProjectName>,
        pretty: bool,
    ) -> FleetScriptServiceResult<ActionOutcome> {
        let parsed: FleetAction = action.parse()?;
        self.run_action(parsed, project, pretty)
    }

    /// Runs `<scripts_dir>/<name>.sh` with no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FleetScriptServiceError::Runner`] when the script is
    /// missing or cannot be started.
    pub fn run_script(&self, name: &ScriptName) -> FleetScriptServiceResult<ActionOutcome> {
        let script = self.scripts_dir.join(name.file_name());
        let command = ScriptCommand::new(script.as_str()).current_dir(self.repository_dir.clone());
        Ok(ActionOutcome::from(self.runner.execute(&command)?))
    }

    /// Returns the commit the checkout is at, or [`UNKNOWN_COMMIT`] when it
    /// cannot be determined.
    #[must_use]
    pub fn commit_hash(&self) -> String {
        let command = ScriptCommand::git_head().current_dir(self.repository_dir.clone());
        match self.runner.execute(&command) {
            Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
                output.stdout.trim().to_owned()
            }
            Ok(output) => {
                debug!(exit_code = ?output.exit_code, "git rev-parse failed");
                UNKNOWN_COMMIT.to_owned()
            }
            Err(err) => {
                debug!(error = %err, "git is unavailable");
                UNKNOWN_COMMIT.to_owned()
            }
        }
    }
}
