//! In-memory services root for reconciler tests.

use crate::project_registry::{
    domain::{DEFAULT_MANIFEST_NAMES, Project, ProjectName},
    ports::{ProjectTree, ProjectTreeError, ProjectTreeResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory services root.
///
/// Directories are listed in name order. Files are addressed by full path
/// under the configured root.
#[derive(Debug, Clone)]
pub struct InMemoryProjectTree {
    root: Utf8PathBuf,
    state: Arc<RwLock<InMemoryTreeState>>,
}

#[derive(Debug, Default)]
struct InMemoryTreeState {
    directories: BTreeSet<String>,
    files: BTreeMap<Utf8PathBuf, String>,
}

impl InMemoryProjectTree {
    /// Creates an empty tree rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            state: Arc::new(RwLock::new(InMemoryTreeState::default())),
        }
    }

    /// Returns the root path.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Creates an empty directory under the root.
    ///
    /// # Errors
    ///
    /// Returns tree errors when lock acquisition fails.
    pub fn add_directory(&self, directory: &str) -> ProjectTreeResult<()> {
        let mut state = self.write_state()?;
        state.directories.insert(directory.to_owned());
        Ok(())
    }

    /// Writes a file inside a directory under the root, creating the
    /// directory if needed, and returns its full path.
    ///
    /// # Errors
    ///
    /// Returns tree errors when lock acquisition fails.
    pub fn write_file(
        &self,
        directory: &str,
        file_name: &str,
        contents: impl Into<String>,
    ) -> ProjectTreeResult<Utf8PathBuf> {
        let path = self.root.join(directory).join(file_name);
        let mut state = self.write_state()?;
        state.directories.insert(directory.to_owned());
        state.files.insert(path.clone(), contents.into());
        Ok(path)
    }

    /// Removes a file. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns tree errors when lock acquisition fails.
    pub fn remove_file(&self, path: &Utf8Path) -> ProjectTreeResult<bool> {
        let mut state = self.write_state()?;
        Ok(state.files.remove(path).is_some())
    }

    fn write_state(&self) -> ProjectTreeResult<std::sync::RwLockWriteGuard<'_, InMemoryTreeState>> {
        self.state.write().map_err(|err| {
            ProjectTreeError::root_unavailable(self.root.clone(), io::Error::other(err.to_string()))
        })
    }

    fn discover_from(&self, state: &InMemoryTreeState) -> Vec<ProjectTreeResult<Project>> {
        state
            .directories
            .iter()
            .filter_map(|directory| {
                let manifest = DEFAULT_MANIFEST_NAMES.iter().find(|manifest| {
                    state
                        .files
                        .contains_key(&self.root.join(directory).join(manifest))
                })?;
                Some(
                    ProjectName::new(directory.as_str())
                        .map(|name| Project::in_services_root(&self.root, name, manifest))
                        .map_err(|err| ProjectTreeError::InvalidEntry {
                            entry: directory.clone(),
                            reason: err.to_string(),
                        }),
                )
            })
            .collect()
    }
}

impl ProjectTree for InMemoryProjectTree {
    type Projects = std::vec::IntoIter<ProjectTreeResult<Project>>;

    fn discover(&self) -> ProjectTreeResult<Self::Projects> {
        let state = self.state.read().map_err(|err| {
            ProjectTreeError::root_unavailable(self.root.clone(), io::Error::other(err.to_string()))
        })?;
        Ok(self.discover_from(&state).into_iter())
    }

    fn read_manifest(&self, compose_path: &Utf8Path) -> ProjectTreeResult<String> {
        let state = self.state.read().map_err(|err| {
            ProjectTreeError::read(compose_path, io::Error::other(err.to_string()))
        })?;
        state.files.get(compose_path).cloned().ok_or_else(|| {
            ProjectTreeError::read(
                compose_path,
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )
        })
    }

    fn env_file_present(&self, env_path: &Utf8Path) -> bool {
        self.state
            .read()
            .map(|state| state.files.contains_key(env_path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn discovers_only_directories_with_manifests() {
        let tree = InMemoryProjectTree::new("/srv/docker");
        tree.write_file("alpha", "docker-compose.yaml", "services: {}\n")
            .expect("write should succeed");
        tree.write_file("beta", "compose.yml", "services: {}\n")
            .expect("write should succeed");
        tree.write_file("notes", "README.md", "# notes\n")
            .expect("write should succeed");
        tree.add_directory("empty").expect("mkdir should succeed");

        let names: HashSet<String> = tree
            .discover()
            .expect("discovery should succeed")
            .map(|project| {
                project
                    .expect("project should be valid")
                    .name()
                    .as_str()
                    .to_owned()
            })
            .collect();

        assert_eq!(names, HashSet::from(["alpha".to_owned(), "beta".to_owned()]));
    }

    #[test]
    fn removed_manifest_becomes_unreadable() {
        let tree = InMemoryProjectTree::new("/srv/docker");
        let path = tree
            .write_file("alpha", "compose.yaml", "services: {}\n")
            .expect("write should succeed");

        assert!(tree.remove_file(&path).expect("remove should succeed"));
        assert!(matches!(
            tree.read_manifest(&path),
            Err(ProjectTreeError::Read { .. })
        ));
    }
}
