//! libSQL table store for local SQLite-format files and remote `libsql://`
//! databases.

use std::path::Path;

use async_trait::async_trait;
use conform_core::entities::CategoricalValue;
use libsql::{Builder, Value};

use crate::error::StorageError;
use crate::sql::{parse_date, qualified_table, quote_ident, split_table};
use crate::{DateRange, TableStore, count_to_u64, limit_to_i64};

pub struct LibSqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    backend: &'static str,
}

impl LibSqlStore {
    /// Open a local database file. `":memory:"` opens a private in-memory
    /// database.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the file does not exist or
    /// cannot be opened. Missing files are never created.
    pub async fn open_local(path: &str) -> Result<Self, StorageError> {
        if path != ":memory:" && !Path::new(path).exists() {
            return Err(StorageError::Connection(format!(
                "database file not found: {path}"
            )));
        }
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Connection(format!("{path}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StorageError::Connection(format!("{path}: {e}")))?;
        tracing::debug!(path, "opened libsql database");
        Ok(Self {
            db,
            conn,
            backend: "libsql",
        })
    }

    /// Connect to a remote libSQL server.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the client cannot be built.
    pub async fn open_remote(url: &str, auth_token: String) -> Result<Self, StorageError> {
        let db = Builder::new_remote(url.to_string(), auth_token)
            .build()
            .await
            .map_err(|e| StorageError::Connection(format!("{url}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StorageError::Connection(format!("{url}: {e}")))?;
        tracing::debug!(url, "connected to remote libsql database");
        Ok(Self {
            db,
            conn,
            backend: "libsql_remote",
        })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

/// Textual form of a scalar value, `None` for NULL.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

#[async_trait]
impl TableStore for LibSqlStore {
    fn backend(&self) -> &'static str {
        self.backend
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        let mut rows = match split_table(table) {
            (Some(schema), name) => {
                self.conn
                    .query(
                        "SELECT name FROM pragma_table_info(?1, ?2) ORDER BY cid",
                        libsql::params![name, schema],
                    )
                    .await?
            }
            (None, name) => {
                self.conn
                    .query(
                        "SELECT name FROM pragma_table_info(?1) ORDER BY cid",
                        libsql::params![name],
                    )
                    .await?
            }
        };

        let mut columns = Vec::new();
        while let Some(row) = rows.next().await? {
            columns.push(row.get::<String>(0)?);
        }
        if columns.is_empty() {
            return Err(StorageError::TableNotFound {
                table: table.to_string(),
            });
        }
        Ok(columns)
    }

    async fn row_count(&self, table: &str) -> Result<u64, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", qualified_table(table));
        let mut rows = self.conn.query(&sql, ()).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StorageError::Query(format!("no result for COUNT(*) on {table}")))?;
        Ok(count_to_u64(row.get::<i64>(0)?))
    }

    async fn date_range(&self, table: &str, column: &str) -> Result<DateRange, StorageError> {
        let col = quote_ident(column);
        let sql = format!(
            "SELECT CAST(MIN({col}) AS TEXT), CAST(MAX({col}) AS TEXT) FROM {}",
            qualified_table(table)
        );
        let mut rows = self.conn.query(&sql, ()).await?;
        let Some(row) = rows.next().await? else {
            return Ok((None, None));
        };
        let min = value_text(row.get_value(0)?);
        let max = value_text(row.get_value(1)?);
        Ok((
            min.as_deref().and_then(parse_date),
            max.as_deref().and_then(parse_date),
        ))
    }

    async fn sample_categorical(
        &self,
        table: &str,
        column: &str,
        limit: usize,
    ) -> Result<Vec<CategoricalValue>, StorageError> {
        let col = quote_ident(column);
        let sql = format!(
            "SELECT CAST({col} AS TEXT) AS v, COUNT(*) AS n FROM {}
             WHERE {col} IS NOT NULL
             GROUP BY v
             ORDER BY n DESC, v ASC
             LIMIT ?1",
            qualified_table(table)
        );
        let mut rows = self
            .conn
            .query(&sql, libsql::params![limit_to_i64(limit)])
            .await?;

        let mut values = Vec::new();
        while let Some(row) = rows.next().await? {
            let Some(value) = value_text(row.get_value(0)?) else {
                continue;
            };
            values.push(CategoricalValue::new(value, count_to_u64(row.get::<i64>(1)?)));
        }
        Ok(values)
    }
}
