//! Port receiving soft failures and findings during a scan.

use crate::project_registry::domain::ProjectName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Progress information.
    Info,
    /// Something the operator should look at.
    Warning,
    /// A failure that stopped part of the work.
    Error,
}

impl Severity {
    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Message emitted to a [`DiagnosticSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Project the message is about, if any.
    pub project: Option<ProjectName>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic about a specific project.
    #[must_use]
    pub fn for_project(severity: Severity, project: &ProjectName, message: impl Into<String>) -> Self {
        Self {
            severity,
            project: Some(project.clone()),
            message: message.into(),
        }
    }

    /// Creates a diagnostic that is not tied to a project.
    #[must_use]
    pub fn general(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            project: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.project {
            Some(project) => write!(formatter, "[{}] {project}: {}", self.severity, self.message),
            None => write!(formatter, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Destination for scan diagnostics.
///
/// The caller opens the sink before a scan and flushes it afterwards.
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic.
    fn emit(&self, diagnostic: Diagnostic);

    /// Flushes buffered diagnostics.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the underlying destination.
    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }
}
