//! Service layer for project discovery and registry reconciliation.

use crate::project_registry::{
    domain::{
        ComposeInspection, ComposeRules, ConfigOrigin, Finding, Findings, Insertion, Project,
        ProjectConfig, ProjectName, ProjectRegistryDomainError, ProjectReport, Reconciliation,
        Registry, ScanId, ScanReport, evaluate,
    },
    ports::{
        ConfigProvider, ConfigProviderError, Diagnostic, DiagnosticSink, ProjectTree,
        ProjectTreeError, RegistryStore, RegistryStoreError, Severity,
    },
};
use camino::Utf8Path;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, info_span};

/// Service-level errors that stop a scan.
#[derive(Debug, Error)]
pub enum ReconcilerError {
    /// The services root could not be enumerated.
    #[error(transparent)]
    Discovery(#[from] ProjectTreeError),

    /// The registry document could not be loaded.
    #[error(transparent)]
    Store(#[from] RegistryStoreError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectRegistryDomainError),

    /// The configuration provider could not configure a project.
    #[error("configuring project {project} failed: {source}")]
    Provider {
        /// Project being configured.
        project: ProjectName,
        /// Provider failure.
        source: ConfigProviderError,
    },

    /// The registry could not be saved after adding a project.
    #[error("saving the registry entry for project {project} failed: {source}")]
    Persistence {
        /// Project whose entry was being saved.
        project: ProjectName,
        /// Store failure.
        source: RegistryStoreError,
    },
}

impl ReconcilerError {
    /// Returns the project the scan stopped at, when the failure is tied to
    /// one.
    #[must_use]
    pub const fn project(&self) -> Option<&ProjectName> {
        match self {
            Self::Provider { project, .. } | Self::Persistence { project, .. } => Some(project),
            Self::Domain(ProjectRegistryDomainError::ConflictingConfig { project }) => Some(project),
            Self::Discovery(_) | Self::Store(_) | Self::Domain(_) => None,
        }
    }
}

/// Result type for reconciler operations.
pub type ReconcilerResult<T> = Result<T, ReconcilerError>;

/// Final registry and report of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Registry after every new project was added.
    pub registry: Registry,
    /// Per-project results.
    pub report: ScanReport,
}

/// Discovers projects, configures unknown ones and reports drift.
#[derive(Clone)]
pub struct ProjectRegistryReconciler<T, S, P, C>
where
    T: ProjectTree,
    S: RegistryStore,
    P: ConfigProvider,
    C: Clock + Send + Sync,
{
    tree: Arc<T>,
    store: Arc<S>,
    provider: Arc<P>,
    clock: Arc<C>,
    rules: ComposeRules,
}

impl<T, S, P, C> ProjectRegistryReconciler<T, S, P, C>
where
    T: ProjectTree,
    S: RegistryStore,
    P: ConfigProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new reconciler.
    #[must_use]
    pub const fn new(
        tree: Arc<T>,
        store: Arc<S>,
        provider: Arc<P>,
        clock: Arc<C>,
        rules: ComposeRules,
    ) -> Self {
        Self {
            tree,
            store,
            provider,
            clock,
            rules,
        }
    }

    /// Loads the registry document.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Store`] when the document cannot be read
    /// or decoded.
    pub fn load_registry(&self) -> ReconcilerResult<Registry> {
        Ok(self.store.load()?)
    }

    /// Lists the projects currently present under the services root.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Discovery`] when the root cannot be
    /// enumerated.
    pub fn discover_projects(&self) -> ReconcilerResult<T::Projects> {
        Ok(self.tree.discover()?)
    }

    /// Inspects a compose manifest.
    ///
    /// Read failures are reported to `diagnostics` and produce an inspection
    /// with both flags cleared.
    pub fn inspect_compose(
        &self,
        compose_path: &Utf8Path,
        diagnostics: &impl DiagnosticSink,
    ) -> ComposeInspection {
        match self.tree.read_manifest(compose_path) {
            Ok(manifest) => self.rules.inspect(&manifest),
            Err(err) => {
                diagnostics.emit(Diagnostic::general(Severity::Warning, err.to_string()));
                ComposeInspection::unreadable()
            }
        }
    }

    /// Looks a project up in `registry` without modifying it.
    #[must_use]
    pub fn reconcile<'r>(&self, registry: &'r Registry, project: &Project) -> Reconciliation<'r> {
        registry.reconcile(project)
    }

    /// Adds `config` for `project` and persists the registry.
    ///
    /// Applying a configuration that is already registered does not write
    /// the document again.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Domain`] when a different configuration is
    /// already registered and [`ReconcilerError::Persistence`] when the
    /// document cannot be saved.
    pub fn apply_new_config(
        &self,
        registry: Registry,
        project: &ProjectName,
        config: ProjectConfig,
    ) -> ReconcilerResult<Registry> {
        let mut updated = registry;
        if updated.insert_new(project.clone(), config)? == Insertion::Unchanged {
            return Ok(updated);
        }

        self.store
            .save(&updated)
            .map_err(|source| ReconcilerError::Persistence {
                project: project.clone(),
                source,
            })?;
        info!(project = %project, "added project to registry");
        Ok(updated)
    }

    /// Evaluates a project against the filesystem and its configuration.
    #[must_use]
    pub fn evaluate_project(
        &self,
        project: &Project,
        inspection: ComposeInspection,
        config: &ProjectConfig,
    ) -> Findings {
        let env_file_present = self.tree.env_file_present(project.env_path());
        evaluate(project, inspection, config, env_file_present)
    }

    /// Scans every project under the services root.
    ///
    /// Unknown projects are configured through the provider and persisted
    /// one at a time, so a failure leaves earlier registrations saved.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Discovery`] when the root cannot be
    /// enumerated, and provider, domain or persistence errors naming the
    /// project the scan stopped at.
    pub fn run_scan(
        &self,
        registry: Registry,
        diagnostics: &impl DiagnosticSink,
    ) -> ReconcilerResult<ScanOutcome> {
        let scan_id = ScanId::new();
        let span = info_span!("scan", %scan_id);
        let _entered = span.enter();
        let started_at = self.clock.utc();

        let mut current = registry;
        let mut reports = Vec::new();
        for discovered in self.discover_projects()? {
            let project = match discovered {
                Ok(project) => project,
                Err(err) => {
                    diagnostics.emit(Diagnostic::general(Severity::Warning, err.to_string()));
                    continue;
                }
            };
            let (next, report) = self
                .scan_project(current, project, diagnostics)
                .inspect_err(|err| diagnostics.emit(failure_diagnostic(err)))?;
            current = next;
            reports.push(report);
        }

        debug!(projects = reports.len(), "scan complete");
        Ok(ScanOutcome {
            registry: current,
            report: ScanReport {
                id: scan_id,
                started_at,
                finished_at: self.clock.utc(),
                projects: reports,
            },
        })
    }

    fn scan_project(
        &self,
        registry: Registry,
        project: Project,
        diagnostics: &impl DiagnosticSink,
    ) -> ReconcilerResult<(Registry, ProjectReport)> {
        let name = project.name().clone();
        diagnostics.emit(Diagnostic::for_project(Severity::Info, &name, "inspecting"));

        let inspection = self.inspect_compose(project.compose_path(), diagnostics);
        let registered = match self.reconcile(&registry, &project) {
            Reconciliation::Registered(config) => Some(config.clone()),
            Reconciliation::NeedsConfig => None,
        };

        let (updated, origin, config) = match registered {
            Some(config) => (registry, ConfigOrigin::Registered, config),
            None => {
                diagnostics.emit(Diagnostic::for_project(
                    Severity::Info,
                    &name,
                    "new project detected",
                ));
                let config = self
                    .provider
                    .obtain_config(&name, inspection.has_routing_annotations())
                    .map_err(|source| ReconcilerError::Provider {
                        project: name.clone(),
                        source,
                    })?;
                let updated = self.apply_new_config(registry, &name, config.clone())?;
                diagnostics.emit(Diagnostic::for_project(
                    Severity::Info,
                    &name,
                    "added to registry",
                ));
                (updated, ConfigOrigin::NewlyConfigured, config)
            }
        };

        let env_file_present = self.tree.env_file_present(project.env_path());
        let findings: Vec<Finding> =
            evaluate(&project, inspection, &config, env_file_present).collect();
        for finding in &findings {
            diagnostics.emit(Diagnostic::for_project(
                Severity::Warning,
                &name,
                finding.to_string(),
            ));
        }

        Ok((
            updated,
            ProjectReport {
                project,
                inspection,
                env_file_present,
                origin,
                config,
                findings,
            },
        ))
    }
}

/// Error diagnostic for the failure that stopped a scan.
fn failure_diagnostic(err: &ReconcilerError) -> Diagnostic {
    err.project().map_or_else(
        || Diagnostic::general(Severity::Error, err.to_string()),
        |project| Diagnostic::for_project(Severity::Error, project, err.to_string()),
    )
}
