//! Domain model for project discovery and registry reconciliation.
//!
//! Projects, manifest inspections and findings are recomputed on every scan.
//! Only [`Registry`] entries are persisted, and only through the store port.

mod config;
mod error;
mod finding;
mod inspection;
mod name;
mod project;
mod registry;
mod report;

pub use config::{Entrypoint, Hostname, InternalPort, ProjectConfig};
pub use error::{ParseEntrypointError, ProjectRegistryDomainError};
pub use finding::{Finding, Findings, evaluate};
pub use inspection::{ComposeInspection, ComposeRules, DEFAULT_PROXY_NAME, ENV_FILE_DIRECTIVE};
pub use name::ProjectName;
pub use project::{DEFAULT_MANIFEST_NAMES, ENV_FILE_NAME, Project};
pub use registry::{Insertion, Reconciliation, Registry};
pub use report::{ConfigOrigin, ProjectReport, ScanId, ScanReport};
