//! Port supplying routing configuration for newly discovered projects.

use crate::project_registry::domain::{ProjectConfig, ProjectName, ProjectRegistryDomainError};
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration provider operations.
pub type ConfigProviderResult<T> = Result<T, ConfigProviderError>;

/// Source of [`ProjectConfig`] values for unregistered projects.
///
/// Implementations may block on operator input. Invalid input must be
/// retried inside the provider; whatever it returns is final.
pub trait ConfigProvider: Send + Sync {
    /// Obtains the configuration for `project`.
    ///
    /// `routed_default` is the suggested answer to "should this project be
    /// routed through the proxy".
    ///
    /// # Errors
    ///
    /// Returns [`ConfigProviderError`] when no configuration can be
    /// produced; the scan stops at this project.
    fn obtain_config(
        &self,
        project: &ProjectName,
        routed_default: bool,
    ) -> ConfigProviderResult<ProjectConfig>;
}

/// Errors returned by configuration providers.
#[derive(Debug, Clone, Error)]
pub enum ConfigProviderError {
    /// The operator cancelled the prompt.
    #[error("configuration of project {0} was cancelled")]
    Cancelled(ProjectName),

    /// The provider has no answer for the project.
    #[error("no configuration available for project {0}")]
    NoAnswer(ProjectName),

    /// The provider produced values that fail validation.
    #[error("invalid configuration for project {project}: {source}")]
    InvalidAnswer {
        /// Project being configured.
        project: ProjectName,
        /// Validation failure.
        source: ProjectRegistryDomainError,
    },

    /// Terminal or I/O failure while collecting input.
    #[error("configuration input failed: {0}")]
    Interaction(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigProviderError {
    /// Wraps a terminal or I/O failure.
    pub fn interaction(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Interaction(Arc::new(err))
    }
}
