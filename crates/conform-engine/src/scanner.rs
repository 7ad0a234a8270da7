//! Reads one domain's copy of a table through its [`TableStore`].

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use conform_core::entities::{CategoricalValue, ReferenceSchema};
use conform_storage::TableStore;

use crate::error::ScanError;

/// What a domain's table looked like at scan time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Column names in the domain's physical order, without duplicates.
    pub columns: Vec<String>,
    pub row_count: u64,
    pub first_record: Option<NaiveDate>,
    pub last_record: Option<NaiveDate>,
    /// Sampled values keyed by column name.
    pub categorical_samples: BTreeMap<String, Vec<CategoricalValue>>,
}

impl TableSnapshot {
    /// Snapshot carrying only a column list.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Scan `schema.table_name` in one domain.
///
/// # Errors
///
/// - [`ScanError::TableNotFound`] when the domain lacks the table
/// - [`ScanError::TableEmpty`] when it has no rows (columns are still returned)
/// - [`ScanError::Query`] / [`ScanError::Connection`] for store failures
pub async fn scan(
    store: &dyn TableStore,
    domain: &str,
    schema: &ReferenceSchema,
    sample_limit: usize,
) -> Result<TableSnapshot, ScanError> {
    let table = schema.table_name.as_str();

    let columns = dedupe_columns(domain, table, store.list_columns(table).await?);
    let row_count = store.row_count(table).await?;
    let mut snapshot = TableSnapshot {
        columns,
        row_count,
        ..TableSnapshot::default()
    };

    if row_count == 0 {
        return Err(ScanError::TableEmpty { snapshot });
    }

    if let Some(freshness) = schema.freshness_column.as_deref()
        && snapshot.has_column(freshness)
    {
        let (first, last) = store.date_range(table, freshness).await?;
        snapshot.first_record = first;
        snapshot.last_record = last;
    }

    for field in schema.categorical_fields() {
        if !snapshot.has_column(&field.column) {
            continue;
        }
        let values = store
            .sample_categorical(table, &field.column, sample_limit)
            .await?;
        snapshot
            .categorical_samples
            .insert(field.column.clone(), order_samples(values, sample_limit));
    }

    tracing::debug!(
        domain,
        table,
        backend = store.backend(),
        columns = snapshot.columns.len(),
        rows = snapshot.row_count,
        "scanned domain table"
    );
    Ok(snapshot)
}

/// Keep the first occurrence of each column name.
fn dedupe_columns(domain: &str, table: &str, columns: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(columns.len());
    columns
        .into_iter()
        .filter(|column| {
            let first = seen.insert(column.clone());
            if !first {
                tracing::warn!(domain, table, column = %column, "duplicate column returned; keeping first occurrence");
            }
            first
        })
        .collect()
}

/// Count descending, then value ascending, at most `limit` entries.
fn order_samples(mut values: Vec<CategoricalValue>, limit: usize) -> Vec<CategoricalValue> {
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    values.truncate(limit);
    values
}
