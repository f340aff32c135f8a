//! Error types for project registry domain validation and parsing.

use super::ProjectName;
use thiserror::Error;

/// Errors returned while constructing project registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectRegistryDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name is not a single directory component.
    #[error("project name '{0}' must be a single directory name")]
    InvalidProjectName(String),

    /// The internal port is outside `1..=65535`.
    #[error("internal port {0} is outside the range 1-65535")]
    InvalidPort(u32),

    /// The internal port is not a decimal number.
    #[error("internal port '{0}' is not a number")]
    UnparseablePort(String),

    /// The hostname is empty after trimming.
    #[error("hostname must not be empty")]
    EmptyHostname,

    /// The hostname contains whitespace or path characters.
    #[error("hostname '{0}' contains invalid characters")]
    InvalidHostname(String),

    /// A different configuration is already registered for the project.
    #[error("project {project} is already registered with a different configuration")]
    ConflictingConfig {
        /// Project whose registration would be overwritten.
        project: ProjectName,
    },
}

/// Error returned while parsing a proxy entrypoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown entrypoint: {0} (expected 'web' or 'websecure')")]
pub struct ParseEntrypointError(pub String);
