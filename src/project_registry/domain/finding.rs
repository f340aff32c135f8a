//! Advisory findings produced when evaluating a project.

use super::{ComposeInspection, Project, ProjectConfig};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observational drift between a project's manifest, its files and its
/// registry entry. Findings never block a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The manifest loads an `.env` file that does not exist.
    MissingEnvFile {
        /// Location the environment file was expected at.
        env_path: Utf8PathBuf,
    },
    /// The project is routed but its manifest carries no proxy labels.
    MissingRoutingAnnotations,
}

impl fmt::Display for Finding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEnvFile { env_path } => write!(formatter, "missing .env file at {env_path}"),
            Self::MissingRoutingAnnotations => {
                formatter.write_str("routing labels not found in compose manifest")
            }
        }
    }
}

/// Lazy, finite sequence of findings for one project.
#[derive(Debug, Clone)]
pub struct Findings {
    inner: std::iter::Flatten<std::array::IntoIter<Option<Finding>, 2>>,
}

impl Iterator for Findings {
    type Item = Finding;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Evaluates a project against its inspection and effective configuration.
///
/// `env_file_present` reflects the filesystem at evaluation time.
#[must_use]
pub fn evaluate(
    project: &Project,
    inspection: ComposeInspection,
    config: &ProjectConfig,
    env_file_present: bool,
) -> Findings {
    let missing_env = (inspection.env_file_referenced() && !env_file_present).then(|| {
        Finding::MissingEnvFile {
            env_path: project.env_path().to_owned(),
        }
    });
    let missing_labels = (config.routed() && !inspection.has_routing_annotations())
        .then_some(Finding::MissingRoutingAnnotations);

    Findings {
        inner: [missing_env, missing_labels].into_iter().flatten(),
    }
}
