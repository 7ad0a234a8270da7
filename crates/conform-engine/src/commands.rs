//! Command-style entry points. Each takes a `schema.json` path and returns a
//! serializable response.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use conform_core::address::TableAddress;
use conform_core::entities::ReferenceSchema;
use conform_core::responses::{
    DomainReportRow, SchemaDocResponse, SchemaValidateResponse, ScanTableResponse,
    TableReportResponse,
};
use conform_report::{ReportError, ReportReader, ReportWriter, generate_schema_markdown};
use conform_schema::SchemaRegistry;

use crate::error::EngineError;
use crate::run::ScanEngine;

fn load(schema_path: &Path) -> Result<(TableAddress, ReferenceSchema), EngineError> {
    let address = TableAddress::from_schema_path(schema_path)?;
    let schema = SchemaRegistry::new(address.root())?.load_path(schema_path)?;
    Ok((address, schema))
}

/// Scan every domain hosting the table and persist `domains.json` and
/// `categoricals.json`.
///
/// # Errors
///
/// See [`ScanEngine::scan`].
pub async fn scan_table(
    engine: &ScanEngine,
    schema_path: &Path,
    cancel: impl Future<Output = ()> + Send,
) -> Result<ScanTableResponse, EngineError> {
    engine.scan(schema_path, cancel).await
}

/// Render `schema.md` and write it atomically next to the schema.
///
/// # Errors
///
/// Returns [`EngineError::Schema`] if the schema cannot be loaded, or
/// [`EngineError::Report`] if the file cannot be written.
pub async fn generate_schema_doc(
    schema_path: &Path,
    lock_timeout: Duration,
) -> Result<SchemaDocResponse, EngineError> {
    let (address, schema) = load(schema_path)?;
    let markdown = generate_schema_markdown(&schema);
    let bytes = markdown.len();
    let path = ReportWriter::new(lock_timeout)
        .write_markdown(&address, markdown)
        .await?;
    Ok(SchemaDocResponse {
        table: address.key(),
        path: path.display().to_string(),
        bytes,
    })
}

/// Load and validate a schema without scanning.
///
/// # Errors
///
/// Returns [`EngineError::Schema`] with every problem found.
pub fn validate_schema(schema_path: &Path) -> Result<SchemaValidateResponse, EngineError> {
    let (address, schema) = load(schema_path)?;
    Ok(SchemaValidateResponse {
        table: address.key(),
        table_name: schema.table_name.clone(),
        display_name: schema.display_name.clone(),
        fields: schema.fields.len(),
        key_fields: schema.fields.iter().filter(|f| f.is_key).count(),
        categorical_fields: schema.categorical_fields().count(),
        reference_domain: schema.reference_domain,
    })
}

/// Summarize the persisted results of the last scan.
///
/// # Errors
///
/// Returns [`EngineError::Report`] with [`ReportError::NotScanned`] when the
/// table has never been scanned.
pub fn table_report(schema_path: &Path) -> Result<TableReportResponse, EngineError> {
    let address = TableAddress::from_schema_path(schema_path)?;
    let domains = ReportReader::domains(&address)?;
    let categorical_fields = match ReportReader::categoricals(&address) {
        Ok(file) => file.fields.len(),
        Err(ReportError::NotScanned { .. }) => 0,
        Err(e) => return Err(e.into()),
    };

    let rows = domains
        .domains
        .iter()
        .map(|record| {
            let conformance = record.conformance.as_ref();
            DomainReportRow {
                domain: record.domain.clone(),
                status: record.status,
                conformance: conformance.map(|c| c.status),
                records: record.records,
                missing: conformance.map_or(0, |c| c.missing.len()),
                extra: conformance.map_or(0, |c| c.extra.len()),
                order_mismatches: conformance.map_or(0, |c| c.order_mismatches.len()),
            }
        })
        .collect();

    Ok(TableReportResponse {
        table: address.key(),
        table_name: domains.table_name,
        last_scanned: domains.last_scanned,
        reference_domain: domains.reference_domain,
        summary: domains.summary,
        categorical_fields,
        domains: rows,
    })
}
