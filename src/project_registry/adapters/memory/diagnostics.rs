//! Diagnostic sink that keeps every message in memory.

use crate::project_registry::{
    domain::ProjectName,
    ports::{Diagnostic, DiagnosticSink, Severity},
};
use std::sync::{Arc, Mutex, PoisonError};

/// Diagnostic sink recording messages for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingDiagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded diagnostic in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns recorded diagnostics at `severity`.
    #[must_use]
    pub fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.entries()
            .into_iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .collect()
    }

    /// Returns recorded diagnostics about `project`.
    #[must_use]
    pub fn for_project(&self, project: &ProjectName) -> Vec<Diagnostic> {
        self.entries()
            .into_iter()
            .filter(|diagnostic| diagnostic.project.as_ref() == Some(project))
            .collect()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
