//! Capability-scoped directory helpers shared by the filesystem adapters.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

pub(crate) fn open_ambient_dir(path: &Utf8Path) -> io::Result<Dir> {
    Dir::open_ambient_dir(path, ambient_authority())
}

/// Opens the directory containing `path` and returns it with the file name.
///
/// A bare file name resolves against the working directory.
pub(crate) fn open_parent_dir(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("path {path} must include a file name")))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = open_ambient_dir(parent)?;
    Ok((dir, file_name))
}

/// Creates every missing directory on the way to `path`'s parent.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent().filter(|parent| !parent.as_str().is_empty()) {
        Some(parent) => Dir::create_ambient_dir_all(parent, ambient_authority()),
        None => Ok(()),
    }
}
