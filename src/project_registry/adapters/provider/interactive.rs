//! Terminal prompts for routing configuration.

use crate::project_registry::{
    domain::{Entrypoint, Hostname, InternalPort, ProjectConfig, ProjectName},
    ports::{ConfigProvider, ConfigProviderError, ConfigProviderResult},
};
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

/// Configuration provider asking the operator on the controlling terminal.
///
/// Port and hostname prompts re-ask until the input validates. Pressing Esc
/// at the routing or entrypoint question cancels the project.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveConfigProvider;

impl InteractiveConfigProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ask_routed(project: &ProjectName, routed_default: bool) -> ConfigProviderResult<bool> {
        Confirm::new()
            .with_prompt(format!("Route {project} through the reverse proxy?"))
            .default(routed_default)
            .interact_opt()
            .map_err(ConfigProviderError::interaction)?
            .ok_or_else(|| ConfigProviderError::Cancelled(project.clone()))
    }

    fn ask_port(project: &ProjectName) -> ConfigProviderResult<InternalPort> {
        Input::<InternalPort>::new()
            .with_prompt(format!("Internal port for {project}"))
            .default(InternalPort::default())
            .interact_text()
            .map_err(ConfigProviderError::interaction)
    }

    fn ask_hostname(project: &ProjectName) -> ConfigProviderResult<Hostname> {
        let default = Hostname::local_default(project).map_err(|source| {
            ConfigProviderError::InvalidAnswer {
                project: project.clone(),
                source,
            }
        })?;
        Input::<Hostname>::new()
            .with_prompt(format!("Hostname for {project}"))
            .default(default)
            .interact_text()
            .map_err(ConfigProviderError::interaction)
    }

    fn ask_entrypoint(project: &ProjectName) -> ConfigProviderResult<Entrypoint> {
        let choice = Select::new()
            .with_prompt(format!("Entrypoint for {project}"))
            .items(&Entrypoint::ALL)
            .default(0)
            .interact_opt()
            .map_err(ConfigProviderError::interaction)?
            .ok_or_else(|| ConfigProviderError::Cancelled(project.clone()))?;
        Entrypoint::ALL
            .get(choice)
            .copied()
            .ok_or_else(|| ConfigProviderError::Cancelled(project.clone()))
    }
}

impl ConfigProvider for InteractiveConfigProvider {
    fn obtain_config(
        &self,
        project: &ProjectName,
        routed_default: bool,
    ) -> ConfigProviderResult<ProjectConfig> {
        if !Self::ask_routed(project, routed_default)? {
            debug!(project = %project, "project left unrouted");
            return ProjectConfig::unrouted(project).map_err(|source| {
                ConfigProviderError::InvalidAnswer {
                    project: project.clone(),
                    source,
                }
            });
        }

        let internal_port = Self::ask_port(project)?;
        let hostname = Self::ask_hostname(project)?;
        let entrypoint = Self::ask_entrypoint(project)?;
        Ok(ProjectConfig::new(true, internal_port, hostname, entrypoint))
    }
}
