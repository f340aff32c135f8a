//! Validated project name type.

use super::ProjectRegistryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a project, equal to the name of its directory under the services
/// root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// The input is trimmed. Case is preserved because directory names are
    /// case-sensitive on the hosts this tool targets.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError`] when the name is empty, is `.`
    /// or `..`, or contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectRegistryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ProjectRegistryDomainError::EmptyProjectName);
        }

        let is_path_like = trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed.contains('\0');
        if is_path_like {
            return Err(ProjectRegistryDomainError::InvalidProjectName(
                trimmed.to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = ProjectRegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
