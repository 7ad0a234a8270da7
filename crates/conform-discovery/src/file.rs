//! JSON file registry.
//!
//! ```json
//! {
//!   "domains": [
//!     {
//!       "domain": "acme",
//!       "location": {"backend": "duckdb", "path": "/data/acme.duckdb"},
//!       "hosts": ["crm/contacts", "billing/*"]
//!     }
//!   ]
//! }
//! ```
//!
//! A domain is listed for `entity/model` when its `hosts` contains either
//! `entity/model` or `entity/*`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use conform_core::entities::DomainRef;
use serde::Deserialize;

use crate::error::DiscoveryError;
use crate::{DomainDirectory, dedupe_domains};

#[derive(Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    domains: Vec<RegistryEntry>,
}

#[derive(Deserialize)]
struct RegistryEntry {
    #[serde(flatten)]
    domain: DomainRef,
    #[serde(default)]
    hosts: Vec<String>,
}

impl RegistryEntry {
    fn hosts(&self, entity: &str, model: &str) -> bool {
        self.hosts.iter().any(|host| {
            host.split_once('/')
                .is_some_and(|(e, m)| e == entity && (m == model || m == "*"))
        })
    }
}

/// Domain registry read from a JSON file on every call.
pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DomainDirectory for FileDirectory {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn list_domains(
        &self,
        entity: &str,
        model: &str,
    ) -> Result<Vec<DomainRef>, DiscoveryError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DiscoveryError::Io {
                path: self.path.clone(),
                source,
            })?;
        let document: RegistryDocument = serde_json::from_str(&raw)
            .map_err(|e| DiscoveryError::Parse(format!("{}: {e}", self.path.display())))?;

        let domains: Vec<DomainRef> = document
            .domains
            .into_iter()
            .filter(|entry| entry.hosts(entity, model))
            .map(|entry| entry.domain)
            .collect();

        tracing::debug!(
            registry = %self.path.display(),
            entity,
            model,
            count = domains.len(),
            "listed domains from file registry"
        );
        Ok(dedupe_domains(&format!("{entity}/{model}"), domains))
    }
}
