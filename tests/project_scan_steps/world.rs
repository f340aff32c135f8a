//! Shared world state for project scan BDD scenarios.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use beetroot::project_registry::{
    adapters::memory::{InMemoryProjectTree, InMemoryRegistryStore, RecordingDiagnostics},
    domain::{ComposeRules, ProjectConfig, ProjectName},
    ports::{ConfigProvider, ConfigProviderError, ConfigProviderResult},
    services::{ProjectRegistryReconciler, ReconcilerResult, ScanOutcome},
};
use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::fixture;

/// Manifest with proxy labels and no env file directive.
pub const LABELLED_MANIFEST: &str = concat!(
    "services:\n",
    "  app:\n",
    "    image: nginx\n",
    "    labels:\n",
    "      traefik.http.routers.app.rule: Host(`app.example.org`)\n",
);

/// Manifest that loads `.env` and carries no proxy labels.
pub const ENV_MANIFEST: &str = concat!(
    "services:\n",
    "  app:\n",
    "    image: postgres\n",
    "    env_file: .env\n",
);

/// Provider answering with defaults, cancelling or mutating the tree on cue.
pub struct ScriptedProvider {
    tree: InMemoryProjectTree,
    cancelled: BTreeSet<ProjectName>,
    removals: BTreeMap<ProjectName, Utf8PathBuf>,
}

impl ConfigProvider for ScriptedProvider {
    fn obtain_config(
        &self,
        project: &ProjectName,
        routed_default: bool,
    ) -> ConfigProviderResult<ProjectConfig> {
        if self.cancelled.contains(project) {
            return Err(ConfigProviderError::Cancelled(project.clone()));
        }
        if let Some(path) = self.removals.get(project) {
            self.tree
                .remove_file(path)
                .map_err(ConfigProviderError::interaction)?;
        }
        ProjectConfig::defaults_for(project, routed_default).map_err(|source| {
            ConfigProviderError::InvalidAnswer {
                project: project.clone(),
                source,
            }
        })
    }
}

/// Scenario world for project scan behaviour tests.
pub struct ScanWorld {
    /// Services root under test.
    pub tree: InMemoryProjectTree,
    /// Registry document.
    pub store: InMemoryRegistryStore,
    /// Diagnostics emitted by the last scan.
    pub diagnostics: RecordingDiagnostics,
    /// Projects whose configuration the operator cancels.
    pub cancelled: BTreeSet<ProjectName>,
    /// Files removed when the keyed project is configured.
    pub removals: BTreeMap<ProjectName, Utf8PathBuf>,
    /// Result of the last scan.
    pub result: Option<ReconcilerResult<ScanOutcome>>,
}

impl ScanWorld {
    /// Creates a world with an empty services root and registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: InMemoryProjectTree::new("/srv/beetroot/docker"),
            store: InMemoryRegistryStore::new(),
            diagnostics: RecordingDiagnostics::new(),
            cancelled: BTreeSet::new(),
            removals: BTreeMap::new(),
            result: None,
        }
    }

    /// Builds a reconciler over the world's adapters.
    pub fn reconciler(
        &self,
    ) -> eyre::Result<
        ProjectRegistryReconciler<
            InMemoryProjectTree,
            InMemoryRegistryStore,
            ScriptedProvider,
            DefaultClock,
        >,
    > {
        let provider = ScriptedProvider {
            tree: self.tree.clone(),
            cancelled: self.cancelled.clone(),
            removals: self.removals.clone(),
        };
        Ok(ProjectRegistryReconciler::new(
            Arc::new(self.tree.clone()),
            Arc::new(self.store.clone()),
            Arc::new(provider),
            Arc::new(DefaultClock),
            ComposeRules::traefik()?,
        ))
    }

    /// Returns the successful scan outcome.
    pub fn outcome(&self) -> eyre::Result<&ScanOutcome> {
        match &self.result {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(err)) => Err(eyre::eyre!("scan failed unexpectedly: {err}")),
            None => Err(eyre::eyre!("scan has not been run in scenario world")),
        }
    }
}

impl Default for ScanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ScanWorld {
    ScanWorld::default()
}

/// Parses a project name captured from a step.
pub fn project_name(value: &str) -> eyre::Result<ProjectName> {
    Ok(ProjectName::new(value)?)
}
