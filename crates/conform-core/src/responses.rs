//! Response types returned by the command-style entry points and printed as
//! JSON by the `conform` CLI.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::DomainsSummary;
use crate::enums::{ConformanceStatus, DomainErrorKind, DomainStatus, RunOutcome};

/// A non-fatal per-domain failure captured during a scan run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DomainError {
    pub domain: String,
    pub kind: DomainErrorKind,
    pub message: String,
}

/// Response from `ScanTable` / `conform scan`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScanTableResponse {
    /// `entity/model`.
    pub table: String,
    pub table_name: String,
    pub outcome: RunOutcome,
    pub domains_found: usize,
    pub active_domains: usize,
    pub duration_ms: u64,
    pub errors: Vec<DomainError>,
}

/// Response from `GenerateSchemaDoc` / `conform doc`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SchemaDocResponse {
    pub table: String,
    pub path: String,
    pub bytes: usize,
}

/// Response from `conform validate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SchemaValidateResponse {
    pub table: String,
    pub table_name: String,
    pub display_name: String,
    pub fields: usize,
    pub key_fields: usize,
    pub categorical_fields: usize,
    pub reference_domain: Option<String>,
}

/// One row of `conform report`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DomainReportRow {
    pub domain: String,
    pub status: DomainStatus,
    pub conformance: Option<ConformanceStatus>,
    pub records: Option<u64>,
    pub missing: usize,
    pub extra: usize,
    pub order_mismatches: usize,
}

/// Response from `conform report`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TableReportResponse {
    pub table: String,
    pub table_name: String,
    pub last_scanned: DateTime<Utc>,
    pub reference_domain: Option<String>,
    pub summary: DomainsSummary,
    pub categorical_fields: usize,
    pub domains: Vec<DomainReportRow>,
}
