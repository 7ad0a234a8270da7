//! Assembly of the persisted report roots from per-domain results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use conform_core::address::TableAddress;
use conform_core::entities::{
    CategoricalField, CategoricalsFile, DomainRecord, DomainsFile, DomainsSummary,
    ReferenceSchema,
};

/// Build `domains.json`. Records are sorted by domain slug and the summary is
/// derived from them.
#[must_use]
pub fn build_domains_file(
    schema: &ReferenceSchema,
    address: &TableAddress,
    mut records: Vec<DomainRecord>,
    scanned_at: DateTime<Utc>,
) -> DomainsFile {
    records.sort_by(|a, b| a.domain.cmp(&b.domain));
    DomainsFile {
        table_name: schema.table_name.clone(),
        display_name: schema.display_name.clone(),
        fuel_stage: schema.fuel_stage.clone(),
        model: Some(address.model().to_string()),
        last_scanned: scanned_at,
        reference_domain: schema.reference_domain.clone(),
        summary: DomainsSummary::from_records(&records),
        domains: records,
    }
}

/// Build `categoricals.json` from the run-wide catalog.
#[must_use]
pub fn build_categoricals_file(
    schema: &ReferenceSchema,
    fields: BTreeMap<String, CategoricalField>,
    scanned_at: DateTime<Utc>,
) -> CategoricalsFile {
    CategoricalsFile {
        table_name: schema.table_name.clone(),
        display_name: schema.display_name.clone(),
        last_scanned: scanned_at,
        fields,
    }
}
