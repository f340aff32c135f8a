//! Services root backed by the local filesystem.

use super::dirs::open_ambient_dir;
use crate::project_registry::{
    domain::{DEFAULT_MANIFEST_NAMES, Project, ProjectName},
    ports::{ProjectTree, ProjectTreeError, ProjectTreeResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{File, ReadDir};
use std::io::Read;
use std::sync::Arc;

/// Project tree reading immediate subdirectories of a services root.
///
/// A subdirectory is a project when it contains one of the configured
/// manifest names. Nothing below the first level is visited. Project
/// directories, manifests and env files are resolved through symlinks, so
/// a link pointing outside the services root still counts.
#[derive(Debug, Clone)]
pub struct FsProjectTree {
    root: Utf8PathBuf,
    manifest_names: Arc<[String]>,
}

impl FsProjectTree {
    /// Creates a tree over `root` recognising the standard compose manifest
    /// names.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self::with_manifest_names(root, DEFAULT_MANIFEST_NAMES)
    }

    /// Creates a tree over `root` recognising `manifest_names`, tried in
    /// order.
    #[must_use]
    pub fn with_manifest_names<I, S>(root: impl Into<Utf8PathBuf>, manifest_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            manifest_names: manifest_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the services root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl ProjectTree for FsProjectTree {
    type Projects = DirectoryProjects;

    fn discover(&self) -> ProjectTreeResult<Self::Projects> {
        let entries = open_ambient_dir(&self.root)
            .and_then(|dir| dir.entries())
            .map_err(|err| ProjectTreeError::root_unavailable(self.root.clone(), err))?;
        Ok(DirectoryProjects {
            root: self.root.clone(),
            entries,
            manifest_names: Arc::clone(&self.manifest_names),
        })
    }

    fn read_manifest(&self, compose_path: &Utf8Path) -> ProjectTreeResult<String> {
        let mut manifest = String::new();
        File::open_ambient(compose_path, ambient_authority())
            .and_then(|mut file| file.read_to_string(&mut manifest))
            .map_err(|err| ProjectTreeError::read(compose_path, err))?;
        Ok(manifest)
    }

    fn env_file_present(&self, env_path: &Utf8Path) -> bool {
        env_path.is_file()
    }
}

/// Lazy iterator over the projects of one services root listing.
///
/// Directory entries are read as the iterator advances, so a project whose
/// directory disappears before it is reached is simply not yielded.
pub struct DirectoryProjects {
    root: Utf8PathBuf,
    entries: ReadDir,
    manifest_names: Arc<[String]>,
}

impl std::fmt::Debug for DirectoryProjects {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DirectoryProjects")
            .field("root", &self.root)
            .field("manifest_names", &self.manifest_names)
            .finish_non_exhaustive()
    }
}

impl DirectoryProjects {
    fn manifest_in(&self, project_dir: &Utf8Path) -> Option<&str> {
        self.manifest_names
            .iter()
            .map(String::as_str)
            .find(|manifest| project_dir.join(manifest).is_file())
    }

    fn project_for(&self, directory: String) -> Option<ProjectTreeResult<Project>> {
        let project_dir = self.root.join(&directory);
        if !project_dir.is_dir() {
            return None;
        }
        let manifest = self.manifest_in(&project_dir)?;
        let name = match ProjectName::new(directory.as_str()) {
            Ok(name) if name.as_str() == directory => name,
            Ok(_) => {
                return Some(Err(ProjectTreeError::InvalidEntry {
                    entry: directory,
                    reason: "directory name has leading or trailing whitespace".to_owned(),
                }));
            }
            Err(err) => {
                return Some(Err(ProjectTreeError::InvalidEntry {
                    entry: directory,
                    reason: err.to_string(),
                }));
            }
        };
        Some(Ok(Project::in_services_root(&self.root, name, manifest)))
    }
}

impl Iterator for DirectoryProjects {
    type Item = ProjectTreeResult<Project>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(Err(ProjectTreeError::InvalidEntry {
                        entry: self.root.to_string(),
                        reason: err.to_string(),
                    }));
                }
            };
            let directory = match entry.file_name() {
                Ok(directory) => directory,
                Err(err) => {
                    return Some(Err(ProjectTreeError::InvalidEntry {
                        entry: "<non-UTF-8 name>".to_owned(),
                        reason: err.to_string(),
                    }));
                }
            };
            if let Some(project) = self.project_for(directory) {
                return Some(project);
            }
        }
    }
}
