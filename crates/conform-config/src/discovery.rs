//! Domain registry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default HTTP timeout for registry calls, in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Path to a JSON domain registry file.
    #[serde(default)]
    pub registry_path: String,

    /// Base URL of an HTTP domain registry (e.g., `https://registry.internal`).
    #[serde(default)]
    pub registry_url: String,

    /// Bearer token sent to the HTTP registry.
    #[serde(default)]
    pub registry_token: String,

    /// Request timeout for the HTTP registry.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            registry_path: String::new(),
            registry_url: String::new(),
            registry_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DiscoveryConfig {
    /// Check if any registry source is configured.
    pub fn is_configured(&self) -> bool {
        self.uses_http() || self.uses_file()
    }

    /// The HTTP registry wins when both sources are set.
    pub fn uses_http(&self) -> bool {
        !self.registry_url.is_empty()
    }

    pub fn uses_file(&self) -> bool {
        !self.registry_path.is_empty()
    }

    pub fn has_token(&self) -> bool {
        !self.registry_token.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
