//! Scratch directories for filesystem integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Uniquely named directory below the system temp dir, removed on drop.
pub struct TempRoot {
    path: Utf8PathBuf,
}

impl TempRoot {
    /// Creates `<temp>/<prefix>_<uuid>`.
    pub fn new(prefix: &str) -> eyre::Result<Self> {
        let base = Utf8PathBuf::try_from(std::env::temp_dir())?;
        let dir_name = format!("{prefix}_{}", uuid::Uuid::new_v4());
        Dir::open_ambient_dir(&base, ambient_authority())?.create_dir(&dir_name)?;
        Ok(Self {
            path: base.join(dir_name),
        })
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Opens the directory as a capability handle.
    pub fn dir(&self) -> eyre::Result<Dir> {
        Ok(Dir::open_ambient_dir(&self.path, ambient_authority())?)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> eyre::Result<Utf8PathBuf> {
        let dir = self.dir()?;
        if let Some(parent) = Utf8Path::new(relative).parent().filter(|p| !p.as_str().is_empty()) {
            dir.create_dir_all(parent)?;
        }
        dir.write(relative, contents)?;
        Ok(self.path.join(relative))
    }

    /// Creates a symlink at `link` pointing to the absolute location of
    /// `target`.
    #[cfg(unix)]
    pub fn symlink(&self, target: &str, link: &str) -> eyre::Result<()> {
        std::os::unix::fs::symlink(self.path.join(target), self.path.join(link))?;
        Ok(())
    }

    /// Lists the file names directly inside `relative`.
    pub fn file_names(&self, relative: &str) -> eyre::Result<Vec<String>> {
        let mut names = self
            .dir()?
            .read_dir(relative)?
            .map(|entry| -> eyre::Result<String> { Ok(entry?.file_name()?) })
            .collect::<eyre::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        if let Ok(base) = Dir::open_ambient_dir(
            self.path.parent().unwrap_or_else(|| Utf8Path::new(".")),
            ambient_authority(),
        ) {
            let _ = base.remove_dir_all(self.path.file_name().unwrap_or_default());
        }
    }
}
