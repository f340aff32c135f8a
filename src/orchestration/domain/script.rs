//! Named helper scripts shipped in the scripts directory.

use super::OrchestrationDomainError;
use std::fmt;

/// File extension of helper scripts.
pub const SCRIPT_EXTENSION: &str = "sh";

/// Validated name of a helper script, without directory or extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptName(String);

impl ScriptName {
    /// Creates a validated script name.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationDomainError`] when the name is empty or would
    /// escape the scripts directory.
    pub fn new(value: impl Into<String>) -> Result<Self, OrchestrationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrchestrationDomainError::EmptyScriptName);
        }
        let is_valid = trimmed
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'));
        if !is_valid {
            return Err(OrchestrationDomainError::InvalidScriptName(
                trimmed.to_owned(),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file name of the script, `<name>.sh`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{SCRIPT_EXTENSION}", self.0)
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
