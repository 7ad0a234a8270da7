//! Production mapping from a domain's location to its table store.

use std::sync::Arc;

use async_trait::async_trait;
use conform_core::entities::{DomainLocation, DomainRef};

use crate::error::StorageError;
use crate::{DuckDbStore, LibSqlStore, StoreConnector, TableStore};

/// Opens a [`DuckDbStore`] or [`LibSqlStore`] from the domain's location.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendConnector;

impl BackendConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Resolve the auth token for a remote database from its environment variable.
fn remote_token(domain: &str, env: Option<&str>) -> Result<String, StorageError> {
    let Some(name) = env else {
        return Ok(String::new());
    };
    std::env::var(name).map_err(|_| {
        StorageError::Connection(format!(
            "auth token variable {name} for domain {domain} is not set"
        ))
    })
}

#[async_trait]
impl StoreConnector for BackendConnector {
    async fn connect(&self, domain: &DomainRef) -> Result<Arc<dyn TableStore>, StorageError> {
        let store: Arc<dyn TableStore> = match &domain.location {
            DomainLocation::DuckDb { path } => Arc::new(DuckDbStore::open_read_only(path).await?),
            DomainLocation::LibSql { path } => Arc::new(LibSqlStore::open_local(path).await?),
            DomainLocation::LibSqlRemote {
                url,
                auth_token_env,
            } => {
                let token = remote_token(&domain.domain, auth_token_env.as_deref())?;
                Arc::new(LibSqlStore::open_remote(url, token).await?)
            }
        };
        Ok(store)
    }
}
