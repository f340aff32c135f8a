//! Filesystem layout and scan options of a Beetroot checkout.

use crate::project_registry::{
    adapters::fs::{FsProjectTree, YamlRegistryStore},
    domain::{ComposeRules, DEFAULT_MANIFEST_NAMES, DEFAULT_PROXY_NAME},
    services::{DEFAULT_DOCS_LINK_TEMPLATE, ScanSummaryRenderer},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use thiserror::Error;

/// Services directory, relative to the checkout root.
pub const SERVICES_DIR: &str = "docker";
/// Registry document, relative to the checkout root.
pub const REGISTRY_FILE: &str = "config/service-config.yaml";
/// Helper scripts directory, relative to the checkout root.
pub const SCRIPTS_DIR: &str = "config/scripts";
/// Scan log file, relative to the checkout root.
pub const LOG_FILE: &str = "shared/logs/beetenv.log";

/// Errors raised while resolving settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// The reverse proxy name is empty.
    #[error("reverse proxy name must not be empty")]
    EmptyProxyName,

    /// The routing label pattern could not be compiled.
    #[error("invalid routing label pattern for proxy '{proxy}': {reason}")]
    InvalidProxyPattern {
        /// Proxy name.
        proxy: String,
        /// Compiler message.
        reason: String,
    },
}

/// Resolved locations and options used by the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeetrootSettings {
    root: Utf8PathBuf,
    services_dir: Utf8PathBuf,
    registry_path: Utf8PathBuf,
    scripts_dir: Utf8PathBuf,
    log_file: Option<Utf8PathBuf>,
    docs_link_template: String,
    manifest_names: Vec<String>,
    proxy_name: String,
}

impl BeetrootSettings {
    /// Resolves the standard layout below `root`.
    #[must_use]
    pub fn from_root(root_dir: impl Into<Utf8PathBuf>) -> Self {
        let root: Utf8PathBuf = root_dir.into();
        Self {
            services_dir: root.join(SERVICES_DIR),
            registry_path: root.join(REGISTRY_FILE),
            scripts_dir: root.join(SCRIPTS_DIR),
            log_file: Some(root.join(LOG_FILE)),
            docs_link_template: DEFAULT_DOCS_LINK_TEMPLATE.to_owned(),
            manifest_names: DEFAULT_MANIFEST_NAMES.into_iter().map(str::to_owned).collect(),
            proxy_name: DEFAULT_PROXY_NAME.to_owned(),
            root,
        }
    }

    /// Resolves the standard layout below a platform path.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonUtf8Path`] when `root` is not UTF-8.
    pub fn from_path(root: PathBuf) -> Result<Self, SettingsError> {
        Ok(Self::from_root(utf8(root)?))
    }

    /// Overrides the services directory.
    #[must_use]
    pub fn with_services_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.services_dir = dir.into();
        self
    }

    /// Overrides the registry document location.
    #[must_use]
    pub fn with_registry_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.registry_path = path.into();
        self
    }

    /// Overrides the scripts directory.
    #[must_use]
    pub fn with_scripts_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.scripts_dir = dir.into();
        self
    }

    /// Overrides the log file; `None` disables file logging.
    #[must_use]
    pub fn with_log_file(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Overrides the documentation link template.
    #[must_use]
    pub fn with_docs_link_template(mut self, template: impl Into<String>) -> Self {
        self.docs_link_template = template.into();
        self
    }

    /// Overrides the reverse proxy whose labels are looked for.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyProxyName`] when `proxy` is blank.
    pub fn with_proxy_name(mut self, proxy: &str) -> Result<Self, SettingsError> {
        let trimmed = proxy.trim();
        if trimmed.is_empty() {
            return Err(SettingsError::EmptyProxyName);
        }
        trimmed.clone_into(&mut self.proxy_name);
        Ok(self)
    }

    /// Returns the checkout root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the services directory.
    #[must_use]
    pub fn services_dir(&self) -> &Utf8Path {
        &self.services_dir
    }

    /// Returns the registry document location.
    #[must_use]
    pub fn registry_path(&self) -> &Utf8Path {
        &self.registry_path
    }

    /// Returns the scripts directory.
    #[must_use]
    pub fn scripts_dir(&self) -> &Utf8Path {
        &self.scripts_dir
    }

    /// Returns the log file, if file logging is enabled.
    #[must_use]
    pub fn log_file(&self) -> Option<&Utf8Path> {
        self.log_file.as_deref()
    }

    /// Returns the reverse proxy name.
    #[must_use]
    pub fn proxy_name(&self) -> &str {
        &self.proxy_name
    }

    /// Builds the manifest rules for the configured proxy.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidProxyPattern`] when the label pattern
    /// cannot be compiled.
    pub fn compose_rules(&self) -> Result<ComposeRules, SettingsError> {
        ComposeRules::for_proxy(&self.proxy_name).map_err(|err| {
            SettingsError::InvalidProxyPattern {
                proxy: self.proxy_name.clone(),
                reason: err.to_string(),
            }
        })
    }

    /// Builds the project tree over the services directory.
    #[must_use]
    pub fn project_tree(&self) -> FsProjectTree {
        FsProjectTree::with_manifest_names(self.services_dir.clone(), self.manifest_names.iter().cloned())
    }

    /// Builds the registry store over the registry document.
    #[must_use]
    pub fn registry_store(&self) -> YamlRegistryStore {
        YamlRegistryStore::new(self.registry_path.clone())
    }

    /// Builds the scan summary renderer.
    #[must_use]
    pub fn summary_renderer(&self) -> ScanSummaryRenderer {
        ScanSummaryRenderer::new(self.docs_link_template.clone())
    }
}

/// Converts a platform path to UTF-8.
///
/// # Errors
///
/// Returns [`SettingsError::NonUtf8Path`] when `path` is not UTF-8.
pub fn utf8(path: PathBuf) -> Result<Utf8PathBuf, SettingsError> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|original| SettingsError::NonUtf8Path(original.to_string_lossy().into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_is_resolved_below_root() {
        let settings = BeetrootSettings::from_root("/opt/beetroot");

        assert_eq!(settings.services_dir(), "/opt/beetroot/docker");
        assert_eq!(
            settings.registry_path(),
            "/opt/beetroot/config/service-config.yaml"
        );
        assert_eq!(settings.scripts_dir(), "/opt/beetroot/config/scripts");
        assert_eq!(
            settings.log_file().map(Utf8Path::as_str),
            Some("/opt/beetroot/shared/logs/beetenv.log")
        );
    }

    #[test]
    fn overrides_replace_individual_locations() {
        let settings = BeetrootSettings::from_root("/opt/beetroot")
            .with_registry_path("/etc/beetroot/registry.yaml")
            .with_log_file(None);

        assert_eq!(settings.registry_path(), "/etc/beetroot/registry.yaml");
        assert_eq!(settings.services_dir(), "/opt/beetroot/docker");
        assert!(settings.log_file().is_none());
    }

    #[test]
    fn blank_proxy_name_is_rejected() {
        let result = BeetrootSettings::from_root(".").with_proxy_name("  ");
        assert_eq!(result, Err(SettingsError::EmptyProxyName));
    }

    #[test]
    fn custom_proxy_rules_match_its_labels() {
        let rules = BeetrootSettings::from_root(".")
            .with_proxy_name("caddy")
            .expect("valid proxy")
            .compose_rules()
            .expect("rules should compile");

        assert!(rules.inspect("labels:\n  caddy.reverse_proxy: app:80\n").has_routing_annotations());
        assert!(!rules.inspect("labels:\n  traefik.enable: true\n").has_routing_annotations());
    }
}
