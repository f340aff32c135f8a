//! Filesystem adapters for the services root and the registry document.

mod dirs;
mod store;
mod tree;

pub use store::YamlRegistryStore;
pub use tree::{DirectoryProjects, FsProjectTree};
