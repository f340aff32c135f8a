//! Actions understood by the fleet script.

use super::OrchestrationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fleet-wide operation passed to the fleet script as its first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetAction {
    /// Start services.
    Up,
    /// Stop services.
    Down,
    /// Pull images.
    Pull,
    /// Restart services.
    Restart,
    /// Pull and recreate services.
    Upgrade,
    /// Import projects into the fleet.
    Import,
    /// Report service status without changing anything.
    Ps,
}

impl FleetAction {
    /// Every action, informational ones last.
    pub const ALL: [Self; 7] = [
        Self::Up,
        Self::Down,
        Self::Pull,
        Self::Restart,
        Self::Upgrade,
        Self::Import,
        Self::Ps,
    ];

    /// Returns the argument passed to the fleet script.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Pull => "pull",
            Self::Restart => "restart",
            Self::Upgrade => "upgrade",
            Self::Import => "import",
            Self::Ps => "ps",
        }
    }
}

impl fmt::Display for FleetAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for FleetAction {
    type Err = OrchestrationDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| OrchestrationDomainError::UnknownAction(value.trim().to_owned()))
    }
}
