//! Provider answering from a prepared document in the registry format.

use super::DefaultsConfigProvider;
use crate::project_registry::{
    domain::{ProjectConfig, ProjectName, Registry},
    ports::{ConfigProvider, ConfigProviderError, ConfigProviderResult, RegistryStore, RegistryStoreResult},
};

/// Configuration provider backed by a set of prepared answers.
///
/// Projects missing from the answers fail with
/// [`ConfigProviderError::NoAnswer`] unless a fallback is configured.
#[derive(Debug, Clone, Default)]
pub struct AnswersConfigProvider {
    answers: Registry,
    fallback: Option<DefaultsConfigProvider>,
}

impl AnswersConfigProvider {
    /// Creates a provider answering from `answers`.
    #[must_use]
    pub const fn new(answers: Registry) -> Self {
        Self {
            answers,
            fallback: None,
        }
    }

    /// Loads answers through any registry store, typically a YAML document
    /// written in the same shape as the registry itself.
    ///
    /// # Errors
    ///
    /// Returns store errors when the answers document cannot be read.
    pub fn load(store: &impl RegistryStore) -> RegistryStoreResult<Self> {
        Ok(Self::new(store.load()?))
    }

    /// Uses `fallback` for projects that have no prepared answer.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: DefaultsConfigProvider) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl ConfigProvider for AnswersConfigProvider {
    fn obtain_config(
        &self,
        project: &ProjectName,
        routed_default: bool,
    ) -> ConfigProviderResult<ProjectConfig> {
        if let Some(config) = self.answers.get(project) {
            return Ok(config.clone());
        }
        match &self.fallback {
            Some(fallback) => fallback.obtain_config(project, routed_default),
            None => Err(ConfigProviderError::NoAnswer(project.clone())),
        }
    }
}
