//! Routing configuration persisted for each registered project.

use super::{ParseEntrypointError, ProjectName, ProjectRegistryDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

/// Container port used when a project is not routed through the proxy.
const DEFAULT_INTERNAL_PORT: u16 = 80;

/// Suffix appended to the project name to form a default hostname.
const DEFAULT_HOSTNAME_SUFFIX: &str = ".local";

/// Port a project's container listens on inside the compose network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct InternalPort(NonZeroU16);

impl InternalPort {
    /// Creates a validated port.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError::InvalidPort`] for `0` and for
    /// values above `65535`.
    pub fn new(value: u32) -> Result<Self, ProjectRegistryDomainError> {
        u16::try_from(value)
            .ok()
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(ProjectRegistryDomainError::InvalidPort(value))
    }

    /// Returns the port number.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl Default for InternalPort {
    fn default() -> Self {
        Self(NonZeroU16::new(DEFAULT_INTERNAL_PORT).unwrap_or(NonZeroU16::MIN))
    }
}

impl TryFrom<u32> for InternalPort {
    type Error = ProjectRegistryDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InternalPort> for u32 {
    fn from(value: InternalPort) -> Self {
        Self::from(value.get())
    }
}

impl FromStr for InternalPort {
    type Err = ProjectRegistryDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let parsed = trimmed
            .parse::<u32>()
            .map_err(|_| ProjectRegistryDomainError::UnparseablePort(trimmed.to_owned()))?;
        Self::new(parsed)
    }
}

impl fmt::Display for InternalPort {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.get())
    }
}

/// Hostname the reverse proxy routes to a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Creates a validated hostname.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError`] when the hostname is empty or
    /// contains whitespace or path separators.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectRegistryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ProjectRegistryDomainError::EmptyHostname);
        }

        let is_valid = trimmed
            .chars()
            .all(|character| !character.is_whitespace() && character != '/' && character != '\\');
        if !is_valid {
            return Err(ProjectRegistryDomainError::InvalidHostname(
                trimmed.to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the default hostname for a project, `<name>.local`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError::InvalidHostname`] when the
    /// project name contains whitespace.
    pub fn local_default(project: &ProjectName) -> Result<Self, ProjectRegistryDomainError> {
        Self::new(format!("{project}{DEFAULT_HOSTNAME_SUFFIX}"))
    }

    /// Returns the hostname as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Hostname {
    type Error = ProjectRegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Hostname {
    type Err = ProjectRegistryDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl From<Hostname> for String {
    fn from(value: Hostname) -> Self {
        value.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Reverse-proxy entrypoint a routed project is published on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entrypoint {
    /// Plain HTTP entrypoint.
    #[default]
    Web,
    /// TLS-terminated entrypoint.
    WebSecure,
}

impl Entrypoint {
    /// All entrypoints in prompt order.
    pub const ALL: [Self; 2] = [Self::Web, Self::WebSecure];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::WebSecure => "websecure",
        }
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Entrypoint {
    type Error = ParseEntrypointError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "web" => Ok(Self::Web),
            "websecure" => Ok(Self::WebSecure),
            _ => Err(ParseEntrypointError(value.to_owned())),
        }
    }
}

impl FromStr for Entrypoint {
    type Err = ParseEntrypointError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// Registry entry describing how a project is exposed through the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    routed: bool,
    internal_port: InternalPort,
    hostname: Hostname,
    entrypoint: Entrypoint,
}

impl ProjectConfig {
    /// Creates a configuration from validated parts.
    #[must_use]
    pub const fn new(
        routed: bool,
        internal_port: InternalPort,
        hostname: Hostname,
        entrypoint: Entrypoint,
    ) -> Self {
        Self {
            routed,
            internal_port,
            hostname,
            entrypoint,
        }
    }

    /// Creates the configuration recorded for a project that is not routed:
    /// port 80, `<name>.local` and the `web` entrypoint.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError`] when the default hostname
    /// cannot be derived from the project name.
    pub fn unrouted(project: &ProjectName) -> Result<Self, ProjectRegistryDomainError> {
        Self::defaults_for(project, false)
    }

    /// Creates a configuration from the default values with the given
    /// routing flag.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryDomainError`] when the default hostname
    /// cannot be derived from the project name.
    pub fn defaults_for(
        project: &ProjectName,
        routed: bool,
    ) -> Result<Self, ProjectRegistryDomainError> {
        Ok(Self::new(
            routed,
            InternalPort::default(),
            Hostname::local_default(project)?,
            Entrypoint::default(),
        ))
    }

    /// Returns whether the project is routed through the reverse proxy.
    #[must_use]
    pub const fn routed(&self) -> bool {
        self.routed
    }

    /// Returns the container port.
    #[must_use]
    pub const fn internal_port(&self) -> InternalPort {
        self.internal_port
    }

    /// Returns the routed hostname.
    #[must_use]
    pub const fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    /// Returns the proxy entrypoint.
    #[must_use]
    pub const fn entrypoint(&self) -> Entrypoint {
        self.entrypoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(80, true)]
    #[case(65_535, true)]
    #[case(0, false)]
    #[case(65_536, false)]
    fn port_range_is_enforced(#[case] value: u32, #[case] valid: bool) {
        assert_eq!(InternalPort::new(value).is_ok(), valid);
    }

    #[test]
    fn port_parses_from_text() {
        let port: InternalPort = " 8080 ".parse().expect("port should parse");
        assert_eq!(port.get(), 8080);
        assert!("eighty".parse::<InternalPort>().is_err());
    }

    #[rstest]
    #[case("web", Entrypoint::Web)]
    #[case("WebSecure", Entrypoint::WebSecure)]
    #[case(" websecure ", Entrypoint::WebSecure)]
    fn entrypoint_parses_case_insensitively(#[case] input: &str, #[case] expected: Entrypoint) {
        assert_eq!(Entrypoint::try_from(input), Ok(expected));
    }

    #[test]
    fn entrypoint_rejects_unknown_values() {
        assert_eq!(
            Entrypoint::try_from("https"),
            Err(ParseEntrypointError("https".to_owned()))
        );
    }

    #[rstest]
    #[case("")]
    #[case("media server.local")]
    #[case("media/server")]
    fn hostname_rejects_invalid_values(#[case] input: &str) {
        assert!(Hostname::new(input).is_err());
    }

    #[test]
    fn unrouted_config_uses_local_defaults() {
        let project = ProjectName::new("gitea").expect("valid project name");
        let config = ProjectConfig::unrouted(&project).expect("defaults should be valid");

        assert!(!config.routed());
        assert_eq!(config.internal_port().get(), 80);
        assert_eq!(config.hostname().as_str(), "gitea.local");
        assert_eq!(config.entrypoint(), Entrypoint::Web);
    }

    #[test]
    fn config_deserializes_registry_field_names() {
        let yaml = "routed: true\ninternal_port: 3000\nhostname: git.example.org\nentrypoint: websecure\n";
        let config: ProjectConfig = serde_yaml::from_str(yaml).expect("config should parse");

        assert!(config.routed());
        assert_eq!(config.internal_port().get(), 3000);
        assert_eq!(config.hostname().as_str(), "git.example.org");
        assert_eq!(config.entrypoint(), Entrypoint::WebSecure);
    }

    #[test]
    fn config_rejects_out_of_range_port() {
        let yaml = "routed: true\ninternal_port: 70000\nhostname: a.local\nentrypoint: web\n";
        assert!(serde_yaml::from_str::<ProjectConfig>(yaml).is_err());
    }
}
