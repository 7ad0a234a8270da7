//! # conform-discovery
//!
//! Lists the domains that host a table.
//!
//! Two registry sources implement [`DomainDirectory`]:
//! - [`FileDirectory`]: a JSON registry document on disk
//! - [`HttpDirectory`]: an HTTP registry service
//!
//! Both deduplicate slugs (first wins, with a warning) before returning.

mod error;
mod file;
mod http;
mod remote;

pub use error::DiscoveryError;
pub use file::FileDirectory;
pub use remote::HttpDirectory;

use std::collections::HashSet;

use async_trait::async_trait;
use conform_config::DiscoveryConfig;
use conform_core::entities::DomainRef;

/// A source of truth for which domains carry a given table.
#[async_trait]
pub trait DomainDirectory: Send + Sync {
    /// Human-readable description of the source, used in logs.
    fn describe(&self) -> String;

    /// List every domain hosting `entity/model`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when the registry cannot be reached or its
    /// answer cannot be understood.
    async fn list_domains(&self, entity: &str, model: &str)
    -> Result<Vec<DomainRef>, DiscoveryError>;
}

/// Build the configured directory. The HTTP registry wins when both a URL and
/// a path are configured.
///
/// # Errors
///
/// Returns [`DiscoveryError::NotConfigured`] when neither source is set, or
/// [`DiscoveryError::Http`] if the HTTP client cannot be built.
pub fn directory_from_config(
    config: &DiscoveryConfig,
) -> Result<Box<dyn DomainDirectory>, DiscoveryError> {
    if config.uses_http() {
        let token = config.has_token().then(|| config.registry_token.clone());
        return Ok(Box::new(HttpDirectory::new(
            &config.registry_url,
            token,
            config.timeout(),
        )?));
    }
    if config.uses_file() {
        return Ok(Box::new(FileDirectory::new(&config.registry_path)));
    }
    Err(DiscoveryError::NotConfigured)
}

/// Drop repeated domain slugs, keeping the first occurrence.
pub(crate) fn dedupe_domains(table: &str, domains: Vec<DomainRef>) -> Vec<DomainRef> {
    let mut seen = HashSet::new();
    domains
        .into_iter()
        .filter(|domain| {
            let first = seen.insert(domain.domain.clone());
            if !first {
                tracing::warn!(table, domain = %domain.domain, "registry listed domain twice; keeping first entry");
            }
            first
        })
        .collect()
}
