//! Non-interactive provider answering with default values.

use crate::project_registry::{
    domain::{ProjectConfig, ProjectName},
    ports::{ConfigProvider, ConfigProviderError, ConfigProviderResult},
};

/// How [`DefaultsConfigProvider`] decides whether a project is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingPolicy {
    /// Route the project when its manifest already carries routing labels.
    #[default]
    FollowManifest,
    /// Never route new projects.
    NeverRoute,
}

/// Configuration provider for batch scans.
///
/// Every new project receives port 80, `<name>.local` and the `web`
/// entrypoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsConfigProvider {
    policy: RoutingPolicy,
}

impl DefaultsConfigProvider {
    /// Creates a provider using `policy`.
    #[must_use]
    pub const fn new(policy: RoutingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the routing policy.
    #[must_use]
    pub const fn policy(&self) -> RoutingPolicy {
        self.policy
    }
}

impl ConfigProvider for DefaultsConfigProvider {
    fn obtain_config(
        &self,
        project: &ProjectName,
        routed_default: bool,
    ) -> ConfigProviderResult<ProjectConfig> {
        let routed = match self.policy {
            RoutingPolicy::FollowManifest => routed_default,
            RoutingPolicy::NeverRoute => false,
        };
        ProjectConfig::defaults_for(project, routed).map_err(|source| {
            ConfigProviderError::InvalidAnswer {
                project: project.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project_registry::domain::Entrypoint;
    use rstest::rstest;

    #[rstest]
    #[case(RoutingPolicy::FollowManifest, true, true)]
    #[case(RoutingPolicy::FollowManifest, false, false)]
    #[case(RoutingPolicy::NeverRoute, true, false)]
    fn routing_follows_policy(
        #[case] policy: RoutingPolicy,
        #[case] routed_default: bool,
        #[case] expected: bool,
    ) {
        let provider = DefaultsConfigProvider::new(policy);
        let project = ProjectName::new("grafana").expect("valid name");

        let config = provider
            .obtain_config(&project, routed_default)
            .expect("defaults should always resolve");

        assert_eq!(config.routed(), expected);
        assert_eq!(config.internal_port().get(), 80);
        assert_eq!(config.hostname().as_str(), "grafana.local");
        assert_eq!(config.entrypoint(), Entrypoint::Web);
    }
}
