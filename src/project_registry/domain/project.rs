//! A deployable service directory discovered under the services root.

use super::ProjectName;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// File name of the environment file expected next to a compose manifest.
pub const ENV_FILE_NAME: &str = ".env";

/// Manifest file names recognised by the compose tool, in lookup order.
pub const DEFAULT_MANIFEST_NAMES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Directory under the services root that contains a compose manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    name: ProjectName,
    compose_path: Utf8PathBuf,
    env_path: Utf8PathBuf,
}

impl Project {
    /// Creates a project from explicit manifest and environment file paths.
    #[must_use]
    pub const fn new(name: ProjectName, compose_path: Utf8PathBuf, env_path: Utf8PathBuf) -> Self {
        Self {
            name,
            compose_path,
            env_path,
        }
    }

    /// Creates a project rooted at `services_root/<name>` whose manifest is
    /// `manifest_name` and whose environment file is `.env`.
    #[must_use]
    pub fn in_services_root(services_root: &Utf8Path, name: ProjectName, manifest_name: &str) -> Self {
        let directory = services_root.join(name.as_str());
        let compose_path = directory.join(manifest_name);
        let env_path = directory.join(ENV_FILE_NAME);
        Self::new(name, compose_path, env_path)
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the compose manifest location.
    #[must_use]
    pub fn compose_path(&self) -> &Utf8Path {
        &self.compose_path
    }

    /// Returns the expected environment file location.
    #[must_use]
    pub fn env_path(&self) -> &Utf8Path {
        &self.env_path
    }
}
