//! Errors raised while loading or checking configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `CONFORM_*` variable could not be read into the config.
    #[error("failed to load conform configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed to run a scan has no usable source.
    #[error("[{section}] is not configured; set it in .conform/config.toml or via CONFORM_ variables")]
    NotConfigured { section: String },

    #[error("{field} is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}
