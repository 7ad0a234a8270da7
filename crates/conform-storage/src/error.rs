//! Storage error types.

use thiserror::Error;

/// Errors from a domain's table store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The table does not exist in the domain's database.
    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    /// The domain's database could not be opened or reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A query failed for a reason other than the driver's own error.
    #[error("Query failed: {0}")]
    Query(String),

    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl StorageError {
    /// True when the failure happened before any query could run.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
