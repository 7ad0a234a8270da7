//! # conform-config
//!
//! Layered configuration loading for conform using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CONFORM_*` prefix, `__` as separator)
//! 2. Project-level `.conform/config.toml`
//! 3. User-level `~/.config/conform/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CONFORM_SCAN__CONCURRENCY` -> `scan.concurrency`,
//! `CONFORM_DISCOVERY__REGISTRY_URL` -> `discovery.registry_url`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use conform_config::ConformConfig;
//!
//! let config = ConformConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! println!("scanning {} domains at a time", config.scan.concurrency);
//! ```

mod discovery;
mod error;
mod general;
mod scan;

pub use discovery::DiscoveryConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use scan::ScanConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConformConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ConformConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".conform/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CONFORM_").split("__"))
    }

    /// Check cross-section constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unusable scan limits and
    /// [`ConfigError::NotConfigured`] when no domain registry is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan.validate()?;
        if !self.discovery.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "discovery".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("conform").join("config.toml"))
    }
}
