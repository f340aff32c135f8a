//! Port for enumerating projects and reading their files.

use crate::project_registry::domain::Project;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for project tree operations.
pub type ProjectTreeResult<T> = Result<T, ProjectTreeError>;

/// Read-only view of the services root.
pub trait ProjectTree: Send + Sync {
    /// Iterator returned by [`ProjectTree::discover`].
    type Projects: Iterator<Item = ProjectTreeResult<Project>>;

    /// Lists the immediate subdirectories that contain a compose manifest.
    ///
    /// Each call enumerates the root afresh. Order is unspecified. Entries
    /// that cannot be turned into a [`Project`] are yielded as errors so the
    /// caller can skip them.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectTreeError::RootUnavailable`] when the root cannot be
    /// enumerated.
    fn discover(&self) -> ProjectTreeResult<Self::Projects>;

    /// Reads a compose manifest as text.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectTreeError::Read`] when the file is missing,
    /// unreadable or not valid UTF-8.
    fn read_manifest(&self, compose_path: &Utf8Path) -> ProjectTreeResult<String>;

    /// Returns whether an environment file exists at `env_path`.
    fn env_file_present(&self, env_path: &Utf8Path) -> bool;
}

/// Errors returned by project tree adapters.
#[derive(Debug, Clone, Error)]
pub enum ProjectTreeError {
    /// The services root cannot be opened or listed.
    #[error("services root {root} cannot be listed: {source}")]
    RootUnavailable {
        /// Services root location.
        root: Utf8PathBuf,
        /// Underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// A directory entry cannot be used as a project.
    #[error("skipping directory entry '{entry}': {reason}")]
    InvalidEntry {
        /// Raw entry name, lossily converted for display.
        entry: String,
        /// Reason string.
        reason: String,
    },

    /// A file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File location.
        path: Utf8PathBuf,
        /// Underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ProjectTreeError {
    /// Wraps a failure to enumerate the services root.
    pub fn root_unavailable(
        root: impl Into<Utf8PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RootUnavailable {
            root: root.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a failure to read a file.
    pub fn read(
        path: impl Into<Utf8PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(err),
        }
    }
}
