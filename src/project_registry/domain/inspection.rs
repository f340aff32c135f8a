//! Text predicates evaluated against a compose manifest.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Directive the compose tool uses to load the project's `.env` file.
pub const ENV_FILE_DIRECTIVE: &str = "env_file: .env";

/// Reverse proxy whose labels are looked for by default.
pub const DEFAULT_PROXY_NAME: &str = "traefik";

/// Facts derived from a compose manifest during a single scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComposeInspection {
    env_file_referenced: bool,
    has_routing_annotations: bool,
}

impl ComposeInspection {
    /// Creates an inspection result.
    #[must_use]
    pub const fn new(env_file_referenced: bool, has_routing_annotations: bool) -> Self {
        Self {
            env_file_referenced,
            has_routing_annotations,
        }
    }

    /// Result used when the manifest cannot be read.
    #[must_use]
    pub const fn unreadable() -> Self {
        Self::new(false, false)
    }

    /// Returns whether the manifest declares a need for an environment file.
    #[must_use]
    pub const fn env_file_referenced(self) -> bool {
        self.env_file_referenced
    }

    /// Returns whether the manifest carries reverse-proxy labels.
    #[must_use]
    pub const fn has_routing_annotations(self) -> bool {
        self.has_routing_annotations
    }
}

/// Substring and label rules applied to manifest text.
///
/// The manifest is never parsed as YAML: both checks operate on the raw
/// text.
#[derive(Debug, Clone)]
pub struct ComposeRules {
    env_directive: String,
    routing_label: Regex,
}

impl ComposeRules {
    /// Builds rules that look for `<proxy_name>.<dot.separated.key>:` labels
    /// and the standard `env_file: .env` directive. The proxy name must
    /// start the label key.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] when the label pattern cannot be compiled.
    pub fn for_proxy(proxy_name: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r#"(?m)(?:^|[\s"']){}\.[\w-]+(?:\.[\w-]+)*["']?\s*:"#,
            regex::escape(proxy_name.trim())
        );
        Ok(Self {
            env_directive: ENV_FILE_DIRECTIVE.to_owned(),
            routing_label: Regex::new(&pattern)?,
        })
    }

    /// Builds rules for the default `traefik` proxy.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] when the label pattern cannot be compiled.
    pub fn traefik() -> Result<Self, regex::Error> {
        Self::for_proxy(DEFAULT_PROXY_NAME)
    }

    /// Evaluates both predicates against manifest text.
    #[must_use]
    pub fn inspect(&self, manifest: &str) -> ComposeInspection {
        ComposeInspection::new(
            manifest.contains(self.env_directive.as_str()),
            self.routing_label.is_match(manifest),
        )
    }
}
