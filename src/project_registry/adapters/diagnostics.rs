//! Diagnostic sink forwarding to the `tracing` subscriber.

use crate::project_registry::{
    domain::ProjectName,
    ports::{Diagnostic, DiagnosticSink, Severity},
};
use tracing::{error, info, warn};

/// Diagnostic sink that logs each message at the matching level.
///
/// Project-scoped diagnostics carry a `project` field so file and console
/// layers can filter on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            project,
            message,
        } = diagnostic;
        let scope = project.as_ref().map(ProjectName::as_str);
        match severity {
            Severity::Info => info!(project = scope, "{message}"),
            Severity::Warning => warn!(project = scope, "{message}"),
            Severity::Error => error!(project = scope, "{message}"),
        }
    }
}
