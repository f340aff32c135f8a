//! Port contracts for project discovery and registry reconciliation.

mod diagnostics;
mod provider;
mod store;
mod tree;

pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use provider::{ConfigProvider, ConfigProviderError, ConfigProviderResult};
pub use store::{RegistryStore, RegistryStoreError, RegistryStoreResult};
pub use tree::{ProjectTree, ProjectTreeError, ProjectTreeResult};
