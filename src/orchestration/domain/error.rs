//! Error types for fleet orchestration domain values.

use thiserror::Error;

/// Errors returned while constructing orchestration domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestrationDomainError {
    /// The action name is not one the fleet script accepts.
    #[error("invalid action: {0}")]
    UnknownAction(String),

    /// The script name is empty after trimming.
    #[error("no script specified")]
    EmptyScriptName,

    /// The script name contains characters outside `[A-Za-z0-9_-]`.
    #[error("script name '{0}' may only contain letters, digits, '-' and '_'")]
    InvalidScriptName(String),
}
