//! Scan fan-out configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default number of domains scanned concurrently.
const fn default_concurrency() -> usize {
    8
}

/// Default per-domain timeout in seconds.
const fn default_domain_timeout_secs() -> u64 {
    30
}

/// Default number of distinct values kept per categorical column.
const fn default_sample_limit() -> usize {
    50
}

/// Default wait for the per-table write lock, in seconds.
const fn default_lock_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Maximum number of domains scanned at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Budget for connecting to and scanning one domain.
    #[serde(default = "default_domain_timeout_secs")]
    pub domain_timeout_secs: u64,

    /// Distinct values kept per categorical column and domain.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// How long a writer waits for another run's lock on the same table.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            domain_timeout_secs: default_domain_timeout_secs(),
            sample_limit: default_sample_limit(),
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub const fn domain_timeout(&self) -> Duration {
        Duration::from_secs(self.domain_timeout_secs)
    }

    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }

    /// Reject values that would stall or starve a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero concurrency, timeout,
    /// or sample limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero = |field: &str| ConfigError::InvalidValue {
            field: format!("scan.{field}"),
            reason: "must be greater than zero".to_string(),
        };
        if self.concurrency == 0 {
            return Err(zero("concurrency"));
        }
        if self.domain_timeout_secs == 0 {
            return Err(zero("domain_timeout_secs"));
        }
        if self.sample_limit == 0 {
            return Err(zero("sample_limit"));
        }
        Ok(())
    }
}
