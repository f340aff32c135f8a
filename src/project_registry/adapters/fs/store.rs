//! YAML registry document stored on the local filesystem.

use super::dirs::{ensure_parent_dir, open_parent_dir};
use crate::project_registry::{
    domain::Registry,
    ports::{RegistryStore, RegistryStoreError, RegistryStoreResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use std::io::{self, Write};
use tracing::debug;
use uuid::Uuid;

/// Registry store persisting a YAML mapping of project name to config.
///
/// Saves write a sibling temporary file and rename it over the document, so
/// readers observe either the previous or the new registry.
#[derive(Debug, Clone)]
pub struct YamlRegistryStore {
    path: Utf8PathBuf,
}

impl YamlRegistryStore {
    /// Creates a store for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document location.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_document(&self) -> io::Result<Option<String>> {
        let (dir, file_name) = match open_parent_dir(&self.path) {
            Ok(opened) => opened,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        match dir.read_to_string(file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl RegistryStore for YamlRegistryStore {
    fn load(&self) -> RegistryStoreResult<Registry> {
        let Some(contents) = self
            .read_document()
            .map_err(RegistryStoreError::persistence)?
        else {
            return Ok(Registry::new());
        };
        if contents.trim().is_empty() {
            return Ok(Registry::new());
        }
        let registry: Option<Registry> =
            serde_yaml::from_str(&contents).map_err(RegistryStoreError::invalid_document)?;
        Ok(registry.unwrap_or_default())
    }

    fn save(&self, registry: &Registry) -> RegistryStoreResult<()> {
        let document = serde_yaml::to_string(registry).map_err(RegistryStoreError::persistence)?;
        ensure_parent_dir(&self.path).map_err(RegistryStoreError::persistence)?;
        let (dir, file_name) = open_parent_dir(&self.path).map_err(RegistryStoreError::persistence)?;

        let temp_name = format!(".{file_name}.{}.tmp", Uuid::new_v4());
        let mut temp = TempFile::new(&dir, temp_name);
        write_synced(&dir, temp.name(), document.as_bytes())
            .map_err(RegistryStoreError::persistence)?;
        dir.rename(temp.name(), &dir, file_name)
            .map_err(RegistryStoreError::persistence)?;
        temp.commit();
        debug!(path = %self.path, entries = registry.len(), "registry saved");
        Ok(())
    }
}

fn write_synced(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut file = dir.create(file_name)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Removes an uncommitted temporary file when dropped.
struct TempFile<'dir> {
    dir: &'dir Dir,
    name: String,
    committed: bool,
}

impl<'dir> TempFile<'dir> {
    const fn new(dir: &'dir Dir, name: String) -> Self {
        Self {
            dir,
            name,
            committed: false,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    const fn commit(&mut self) {
        self.committed = true;
    }
}

impl Drop for TempFile<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match self.dir.remove_file(&self.name) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => {
                debug!(file = %self.name, error = %err, "failed to remove temporary registry file");
            }
            _ => {}
        }
    }
}
