use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CategoricalField, DomainRecord};
use crate::enums::DomainStatus;

/// Counters over the domains of one scan run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DomainsSummary {
    pub total_domains: usize,
    pub active_domains: usize,
    pub empty_domains: usize,
    pub unknown_domains: usize,
    pub total_records: u64,
}

impl DomainsSummary {
    /// Recompute the summary from a list of records.
    #[must_use]
    pub fn from_records(records: &[DomainRecord]) -> Self {
        let count = |status: DomainStatus| records.iter().filter(|r| r.status == status).count();
        Self {
            total_domains: records.len(),
            active_domains: count(DomainStatus::Active),
            empty_domains: count(DomainStatus::Empty),
            unknown_domains: count(DomainStatus::Unknown),
            total_records: records.iter().filter_map(|r| r.records).sum(),
        }
    }
}

/// Aggregate root persisted as `domains.json`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DomainsFile {
    pub table_name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub last_scanned: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_domain: Option<String>,
    pub summary: DomainsSummary,
    pub domains: Vec<DomainRecord>,
}

impl DomainsFile {
    /// Whether the stored summary agrees with the stored domain list.
    #[must_use]
    pub fn summary_is_consistent(&self) -> bool {
        self.summary == DomainsSummary::from_records(&self.domains)
    }
}

/// Aggregate root persisted as `categoricals.json`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoricalsFile {
    pub table_name: String,
    pub display_name: String,
    pub last_scanned: DateTime<Utc>,
    #[serde(default)]
    pub fields: BTreeMap<String, CategoricalField>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DomainLocation, DomainRef};

    fn record(domain: &str, status: DomainStatus, records: Option<u64>) -> DomainRecord {
        let domain = DomainRef {
            domain: domain.into(),
            location: DomainLocation::DuckDb {
                path: format!("{domain}.duckdb"),
            },
            is_test: false,
            source_systems: Vec::new(),
            brands: Vec::new(),
            notes: None,
        };
        DomainRecord {
            records,
            ..DomainRecord::for_domain(&domain, status)
        }
    }

    #[test]
    fn summary_counts_by_status() {
        let records = vec![
            record("a", DomainStatus::Active, Some(10)),
            record("b", DomainStatus::Active, Some(5)),
            record("c", DomainStatus::Test, Some(2)),
            record("d", DomainStatus::Empty, Some(0)),
            record("e", DomainStatus::Unknown, None),
            record("f", DomainStatus::NotFound, None),
        ];
        let summary = DomainsSummary::from_records(&records);
        assert_eq!(summary.total_domains, 6);
        assert_eq!(summary.active_domains, 2);
        assert_eq!(summary.empty_domains, 1);
        assert_eq!(summary.unknown_domains, 1);
        assert_eq!(summary.total_records, 17);
    }
}
