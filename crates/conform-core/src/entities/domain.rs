use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::StructuralConformance;
use crate::enums::DomainStatus;

/// Where a domain's copy of a table lives.
///
/// Each variant is served by exactly one storage capability implementation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "backend")]
pub enum DomainLocation {
    /// A `DuckDB` database file.
    #[serde(rename = "duckdb")]
    DuckDb { path: String },
    /// A local libSQL / `SQLite` database file.
    #[serde(rename = "libsql")]
    LibSql { path: String },
    /// A remote libSQL database (`libsql://...`).
    #[serde(rename = "libsql_remote")]
    LibSqlRemote {
        url: String,
        /// Name of the environment variable holding the auth token.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auth_token_env: Option<String>,
    },
}

impl DomainLocation {
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::DuckDb { .. } => "duckdb",
            Self::LibSql { .. } => "libsql",
            Self::LibSqlRemote { .. } => "libsql_remote",
        }
    }
}

/// A domain expected to host the table, as reported by discovery.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DomainRef {
    pub domain: String,
    pub location: DomainLocation,
    /// Test tenants report `test` instead of `active` when populated.
    #[serde(default)]
    pub is_test: bool,
    #[serde(default)]
    pub source_systems: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Per-domain result of one scan run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DomainRecord {
    pub domain: String,
    pub status: DomainStatus,
    pub records: Option<u64>,
    pub first_record: Option<NaiveDate>,
    pub latest_record: Option<NaiveDate>,
    #[serde(default)]
    pub source_systems: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Always present on the wire; `null` when columns were unavailable.
    pub conformance: Option<StructuralConformance>,
    /// Captured cause when the domain could not be scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainRecord {
    /// Start a record carrying the discovery metadata of `domain`.
    #[must_use]
    pub fn for_domain(domain: &DomainRef, status: DomainStatus) -> Self {
        Self {
            domain: domain.domain.clone(),
            status,
            records: None,
            first_record: None,
            latest_record: None,
            source_systems: domain.source_systems.clone(),
            brands: domain.brands.clone(),
            notes: domain.notes.clone(),
            conformance: None,
            error: None,
        }
    }
}
