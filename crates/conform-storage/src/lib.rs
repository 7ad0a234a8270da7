//! # conform-storage
//!
//! Read-only introspection of a domain's copy of a table.
//!
//! Each storage technology implements [`TableStore`]:
//! - [`DuckDbStore`]: a `DuckDB` file opened read-only
//! - [`LibSqlStore`]: a local libSQL/SQLite file or a remote `libsql://` database
//!
//! [`StoreConnector`] maps a domain's [`DomainLocation`] to a store;
//! [`BackendConnector`] is the production mapping.

mod connector;
mod duckdb_store;
mod error;
mod libsql_store;
pub mod sql;

pub use connector::BackendConnector;
pub use duckdb_store::DuckDbStore;
pub use error::StorageError;
pub use libsql_store::LibSqlStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use conform_core::entities::{CategoricalValue, DomainLocation, DomainRef};

/// Earliest and latest date found in a column.
pub type DateRange = (Option<NaiveDate>, Option<NaiveDate>);

/// Introspection capability over one domain database.
///
/// `table` may be schema-qualified (`schema.table`).
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Backend identifier, matching [`DomainLocation::backend`].
    fn backend(&self) -> &'static str;

    /// Column names in physical order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::TableNotFound`] when the table has no columns.
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, StorageError>;

    /// Total number of rows.
    async fn row_count(&self, table: &str) -> Result<u64, StorageError>;

    /// Minimum and maximum of `column`, read as dates.
    async fn date_range(&self, table: &str, column: &str) -> Result<DateRange, StorageError>;

    /// Distinct non-null values of `column` with their counts, most frequent
    /// first, ties broken by value, at most `limit` entries.
    async fn sample_categorical(
        &self,
        table: &str,
        column: &str,
        limit: usize,
    ) -> Result<Vec<CategoricalValue>, StorageError>;
}

/// Opens the [`TableStore`] for a domain.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] when the database cannot be opened.
    async fn connect(&self, domain: &DomainRef) -> Result<Arc<dyn TableStore>, StorageError>;
}

/// Convert a driver count to `u64`; negative counts cannot occur.
pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// Convert a sample limit to the driver's integer type.
pub(crate) fn limit_to_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
