//! Mapping of project names to persisted routing configuration.

use super::{Project, ProjectConfig, ProjectName, ProjectRegistryDomainError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted routing configuration keyed by project name.
///
/// Entries are only ever added. Projects that disappear from the services
/// root keep their entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: BTreeMap<ProjectName, ProjectConfig>,
}

/// Result of looking a project up in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation<'a> {
    /// The project already has a configuration.
    Registered(&'a ProjectConfig),
    /// The project is unknown and a configuration must be obtained.
    NeedsConfig,
}

impl Reconciliation<'_> {
    /// Returns whether a configuration must be obtained for the project.
    #[must_use]
    pub const fn needs_config(&self) -> bool {
        matches!(self, Self::NeedsConfig)
    }
}

/// Whether inserting a configuration changed the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The entry was added.
    Inserted,
    /// An identical entry was already present.
    Unchanged,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configuration registered for a project.
    #[must_use]
    pub fn get(&self, name: &ProjectName) -> Option<&ProjectConfig> {
        self.entries.get(name)
    }

    /// Returns whether a project is registered.
    #[must_use]
    pub fn contains(&self, name: &ProjectName) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of registered projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no project is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over registered projects in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectName, &ProjectConfig)> {
        self.entries.iter()
    }

    /// Determines whether a project still needs a configuration.
    ///
    /// This never modifies the registry.
    #[must_use]
    pub fn reconcile(&self, project: &Project) -> Reconciliation<'_> {
        self.get(project.name())
            .map_or(Reconciliation::NeedsConfig, Reconciliation::Registered)
    }

    /// Adds a configuration for a project that has none.
    ///
    /// Inserting a configuration identical to the registered one is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError::ConflictingConfig`] when the
    /// project is registered with a different configuration.
    pub fn insert_new(
        &mut self,
        name: ProjectName,
        config: ProjectConfig,
    ) -> Result<Insertion, ProjectRegistryDomainError> {
        match self.entries.get(&name) {
            Some(existing) if *existing == config => Ok(Insertion::Unchanged),
            Some(_) => Err(ProjectRegistryDomainError::ConflictingConfig { project: name }),
            None => {
                self.entries.insert(name, config);
                Ok(Insertion::Inserted)
            }
        }
    }
}

impl FromIterator<(ProjectName, ProjectConfig)> for Registry {
    fn from_iter<T: IntoIterator<Item = (ProjectName, ProjectConfig)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
