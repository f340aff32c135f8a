//! Operator-facing text rendering of a scan report.

use crate::project_registry::domain::{ConfigOrigin, Finding, ProjectName, ProjectReport, ScanReport};
use minijinja::{Environment, context};
use std::fmt::Write;
use thiserror::Error;

/// Documentation link rendered under projects that lack routing labels.
pub const DEFAULT_DOCS_LINK_TEMPLATE: &str = "https://snand.org/docs/services#{{ project }}";

/// Errors raised while rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The documentation link template failed to render.
    #[error("failed to render documentation link for {project}: {source}")]
    DocsLink {
        /// Project the link was rendered for.
        project: ProjectName,
        /// Template error.
        source: minijinja::Error,
    },
    /// Writing to the output buffer failed.
    #[error("failed to format summary: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Renders scan reports as the plain-text summary printed by the CLI.
#[derive(Debug, Clone)]
pub struct ScanSummaryRenderer {
    docs_link_template: String,
}

impl Default for ScanSummaryRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DOCS_LINK_TEMPLATE)
    }
}

impl ScanSummaryRenderer {
    /// Creates a renderer using `docs_link_template`, a `minijinja` template
    /// with a `project` variable.
    #[must_use]
    pub fn new(docs_link_template: impl Into<String>) -> Self {
        Self {
            docs_link_template: docs_link_template.into(),
        }
    }

    /// Renders the documentation link for a project.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::DocsLink`] when the template is invalid.
    pub fn docs_link(&self, project: &ProjectName) -> Result<String, SummaryError> {
        Environment::new()
            .render_str(
                &self.docs_link_template,
                context! { project => project.as_str() },
            )
            .map_err(|source| SummaryError::DocsLink {
                project: project.clone(),
                source,
            })
    }

    /// Renders the whole report.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] when a documentation link cannot be
    /// rendered.
    pub fn render(&self, report: &ScanReport) -> Result<String, SummaryError> {
        let mut output = String::new();
        writeln!(output, "Scanning docker services...")?;
        for project in &report.projects {
            self.render_project(&mut output, project)?;
        }
        writeln!(output)?;
        writeln!(
            output,
            "Environment check complete: {} project(s), {} newly configured, {} finding(s).",
            report.projects.len(),
            report.newly_configured().count(),
            report.finding_count()
        )?;
        Ok(output)
    }

    fn render_project(&self, output: &mut String, report: &ProjectReport) -> Result<(), SummaryError> {
        let name = report.project.name();
        writeln!(output)?;
        writeln!(output, "[{name}]")?;

        if report.origin == ConfigOrigin::NewlyConfigured {
            writeln!(output, "  Added to registry")?;
        }

        let missing_env = report
            .findings
            .iter()
            .any(|finding| matches!(finding, Finding::MissingEnvFile { .. }));
        if missing_env {
            writeln!(output, "  Missing .env file")?;
        } else if report.inspection.env_file_referenced() {
            writeln!(output, "  .env file found")?;
        }

        if report.config.routed() {
            if report.findings.contains(&Finding::MissingRoutingAnnotations) {
                writeln!(output, "  Routing labels not found in compose")?;
                writeln!(output, "    See: {}", self.docs_link(name)?)?;
            } else {
                writeln!(output, "  Routing labels found")?;
            }
        }

        writeln!(output, "  Inspection complete")?;
        Ok(())
    }
}
