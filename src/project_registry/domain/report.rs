//! Per-project and per-scan outcomes.

use super::{ComposeInspection, Finding, Project, ProjectConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a scan run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(Uuid);

impl ScanId {
    /// Creates a new random scan identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// How a project obtained the configuration it was evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOrigin {
    /// The project was already present in the registry.
    Registered,
    /// The project was unknown and was configured during this scan.
    NewlyConfigured,
}

/// Outcome of evaluating one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Evaluated project.
    pub project: Project,
    /// Manifest inspection result.
    pub inspection: ComposeInspection,
    /// Whether the environment file existed at evaluation time.
    pub env_file_present: bool,
    /// Where the configuration came from.
    pub origin: ConfigOrigin,
    /// Effective configuration.
    pub config: ProjectConfig,
    /// Advisory findings.
    pub findings: Vec<Finding>,
}

impl ProjectReport {
    /// Returns whether the scan found nothing to report for this project.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Scan identifier.
    pub id: ScanId,
    /// Time the scan started.
    pub started_at: DateTime<Utc>,
    /// Time the last project was evaluated.
    pub finished_at: DateTime<Utc>,
    /// Project reports in discovery order.
    pub projects: Vec<ProjectReport>,
}

impl ScanReport {
    /// Returns the total number of findings across all projects.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.projects.iter().map(|report| report.findings.len()).sum()
    }

    /// Returns the reports of projects configured during this scan.
    pub fn newly_configured(&self) -> impl Iterator<Item = &ProjectReport> {
        self.projects
            .iter()
            .filter(|report| report.origin == ConfigOrigin::NewlyConfigured)
    }
}
