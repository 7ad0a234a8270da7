//! HTTP registry client.
//!
//! `GET {base}/entities/{entity}/models/{model}/domains` answers
//! `{"domains": [DomainRef, ...]}`.

use std::time::Duration;

use async_trait::async_trait;
use conform_core::entities::DomainRef;
use serde::Deserialize;

use crate::error::DiscoveryError;
use crate::http::check_response;
use crate::{DomainDirectory, dedupe_domains};

#[derive(Deserialize)]
struct DomainsPayload {
    domains: Vec<DomainRef>,
}

/// Client for an HTTP domain registry.
pub struct HttpDirectory {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDirectory {
    /// Create a client for the registry at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DiscoveryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("conform/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn domains_url(&self, entity: &str, model: &str) -> String {
        format!(
            "{}/entities/{}/models/{}/domains",
            self.base_url,
            urlencoding::encode(entity),
            urlencoding::encode(model)
        )
    }
}

/// Parse a registry response body.
fn parse_payload(body: &str) -> Result<Vec<DomainRef>, DiscoveryError> {
    serde_json::from_str::<DomainsPayload>(body)
        .map(|payload| payload.domains)
        .map_err(|e| DiscoveryError::Parse(e.to_string()))
}

#[async_trait]
impl DomainDirectory for HttpDirectory {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn list_domains(
        &self,
        entity: &str,
        model: &str,
    ) -> Result<Vec<DomainRef>, DiscoveryError> {
        let url = self.domains_url(entity, model);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = check_response(request.send().await?).await?;
        let body = resp.text().await?;
        let domains = parse_payload(&body)?;

        tracing::debug!(%url, count = domains.len(), "listed domains from registry");
        Ok(dedupe_domains(&format!("{entity}/{model}"), domains))
    }
}
