//! `DuckDB` table store.
//!
//! The driver is synchronous, so every call runs on the blocking pool with the
//! connection behind a mutex.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conform_core::entities::CategoricalValue;
use duckdb::{AccessMode, Config, Connection, params};

use crate::error::StorageError;
use crate::sql::{parse_date, qualified_table, quote_ident, split_table};
use crate::{DateRange, TableStore, count_to_u64, limit_to_i64};

pub struct DuckDbStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbStore {
    /// Open a `DuckDB` file read-only.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the file is missing or cannot
    /// be opened.
    pub async fn open_read_only(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        tokio::task::spawn_blocking(move || Self::open_blocking(&path))
            .await
            .map_err(|e| StorageError::Connection(format!("open task failed: {e}")))?
    }

    fn open_blocking(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Err(StorageError::Connection(format!(
                "database file not found: {}",
                path.display()
            )));
        }
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "opened duckdb read-only");
        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection (in-memory databases in tests).
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StorageError::Query("duckdb connection poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StorageError::Query(format!("query task failed: {e}")))?
    }
}

#[async_trait]
impl TableStore for DuckDbStore {
    fn backend(&self) -> &'static str {
        "duckdb"
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        let table = table.to_string();
        self.with_conn(move |conn| {
            let (schema, name) = split_table(&table);
            let mut stmt = conn.prepare(
                "SELECT column_name FROM information_schema.columns
                 WHERE table_schema = COALESCE(?, current_schema()) AND table_name = ?
                 ORDER BY ordinal_position",
            )?;
            let columns = stmt
                .query_map(params![schema, name], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            if columns.is_empty() {
                return Err(StorageError::TableNotFound { table });
            }
            Ok(columns)
        })
        .await
    }

    async fn row_count(&self, table: &str) -> Result<u64, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", qualified_table(table));
        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(count_to_u64(count))
        })
        .await
    }

    async fn date_range(&self, table: &str, column: &str) -> Result<DateRange, StorageError> {
        let col = quote_ident(column);
        let sql = format!(
            "SELECT CAST(MIN({col}) AS VARCHAR), CAST(MAX({col}) AS VARCHAR) FROM {}",
            qualified_table(table)
        );
        self.with_conn(move |conn| {
            let (min, max): (Option<String>, Option<String>) =
                conn.query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))?;
            Ok((
                min.as_deref().and_then(parse_date),
                max.as_deref().and_then(parse_date),
            ))
        })
        .await
    }

    async fn sample_categorical(
        &self,
        table: &str,
        column: &str,
        limit: usize,
    ) -> Result<Vec<CategoricalValue>, StorageError> {
        let col = quote_ident(column);
        let sql = format!(
            "SELECT CAST({col} AS VARCHAR) AS v, COUNT(*) AS n FROM {}
             WHERE {col} IS NOT NULL
             GROUP BY v
             ORDER BY n DESC, v ASC
             LIMIT ?",
            qualified_table(table)
        );
        let limit = limit_to_i64(limit);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let values = stmt
                .query_map(params![limit], |row| {
                    Ok(CategoricalValue::new(
                        row.get::<_, String>(0)?,
                        count_to_u64(row.get::<_, i64>(1)?),
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(values)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn seeded() -> DuckDbStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE contacts (id INTEGER, name VARCHAR, stage VARCHAR, created_at TIMESTAMP);
             INSERT INTO contacts VALUES
                (1, 'Ann', 'lead', TIMESTAMP '2023-01-05 10:00:00'),
                (2, 'Bob', 'customer', TIMESTAMP '2023-06-30 08:15:00'),
                (3, 'Cy', 'lead', TIMESTAMP '2024-02-11 23:59:59'),
                (4, 'Di', NULL, NULL),
                (5, 'Ed', 'churned', TIMESTAMP '2023-03-03 00:00:00');
             CREATE SCHEMA sales;
             CREATE TABLE sales.deals (deal_id INTEGER, amount DOUBLE);
             CREATE TABLE empty_table (id INTEGER);",
        )
        .unwrap();
        DuckDbStore::from_connection(conn)
    }

    #[tokio::test]
    async fn lists_columns_in_physical_order() {
        let store = seeded();
        assert_eq!(
            store.list_columns("contacts").await.unwrap(),
            ["id", "name", "stage", "created_at"]
        );
        assert_eq!(
            store.list_columns("sales.deals").await.unwrap(),
            ["deal_id", "amount"]
        );
    }

    #[tokio::test]
    async fn missing_table_is_not_found() {
        let err = seeded().list_columns("ghosts").await.unwrap_err();
        assert!(matches!(err, StorageError::TableNotFound { table } if table == "ghosts"));
    }

    #[tokio::test]
    async fn counts_rows() {
        let store = seeded();
        assert_eq!(store.row_count("contacts").await.unwrap(), 5);
        assert_eq!(store.row_count("empty_table").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn date_range_ignores_nulls() {
        let (first, last) = seeded()
            .date_range("contacts", "created_at")
            .await
            .unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2023, 1, 5));
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 11));
    }

    #[tokio::test]
    async fn date_range_of_empty_table_is_none() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (d DATE);").unwrap();
        let store = DuckDbStore::from_connection(conn);
        assert_eq!(store.date_range("t", "d").await.unwrap(), (None, None));
    }

    #[tokio::test]
    async fn samples_by_count_then_value() {
        let values = seeded()
            .sample_categorical("contacts", "stage", 10)
            .await
            .unwrap();
        assert_eq!(
            values,
            vec![
                CategoricalValue::new("lead", 2),
                CategoricalValue::new("churned", 1),
                CategoricalValue::new("customer", 1),
            ]
        );
    }

    #[tokio::test]
    async fn sample_respects_limit() {
        let values = seeded()
            .sample_categorical("contacts", "stage", 2)
            .await
            .unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].value, "lead");
    }

    #[tokio::test]
    async fn missing_file_is_connection_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = DuckDbStore::open_read_only(tmp.path().join("absent.duckdb"))
            .await
            .err()
            .unwrap();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn opens_existing_file_read_only() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("acme.duckdb");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE t (a INTEGER, b VARCHAR); INSERT INTO t VALUES (1, 'x');")
                .unwrap();
        }

        let store = DuckDbStore::open_read_only(&path).await.unwrap();
        assert_eq!(store.list_columns("t").await.unwrap(), ["a", "b"]);
        assert_eq!(store.row_count("t").await.unwrap(), 1);
    }
}
