//! Engine error types.

use conform_core::enums::{DomainErrorKind, DomainScanState, RunPhase};
use conform_core::errors::CoreError;
use conform_discovery::DiscoveryError;
use conform_report::ReportError;
use conform_schema::SchemaError;
use conform_storage::StorageError;
use thiserror::Error;

use crate::scanner::TableSnapshot;

/// Failure of a single domain's scan. Never fatal to the run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("table {table} not found")]
    TableNotFound { table: String },

    /// The table exists but has no rows. The snapshot still carries columns.
    #[error("table is empty")]
    TableEmpty { snapshot: TableSnapshot },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("timed out after {after_secs}s")]
    Timeout { after_secs: u64 },

    /// The domain's scan task ended without a result.
    #[error("scan task failed: {0}")]
    Internal(String),
}

impl ScanError {
    /// Error category reported in `errors[]`, `None` for outcomes that are
    /// statuses rather than errors.
    #[must_use]
    pub const fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::TableNotFound { .. } | Self::TableEmpty { .. } => None,
            Self::Connection(_) => Some(DomainErrorKind::Connection),
            Self::Query(_) => Some(DomainErrorKind::Query),
            Self::Timeout { .. } => Some(DomainErrorKind::Timeout),
            Self::Internal(_) => Some(DomainErrorKind::Internal),
        }
    }

    #[must_use]
    pub const fn scan_state(&self) -> DomainScanState {
        match self {
            Self::TableNotFound { .. } => DomainScanState::NotFound,
            Self::TableEmpty { .. } => DomainScanState::Empty,
            _ => DomainScanState::Error,
        }
    }
}

impl From<StorageError> for ScanError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TableNotFound { table } => Self::TableNotFound { table },
            StorageError::Connection(message) => Self::Connection(message),
            other => Self::Query(other.to_string()),
        }
    }
}

/// Failure of a whole run or command.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("domain discovery unavailable for {table}: {source}")]
    DiscoveryUnavailable {
        table: String,
        #[source]
        source: DiscoveryError,
    },

    #[error("failed to persist results for {table}: {source}")]
    Persistence {
        table: String,
        #[source]
        source: ReportError,
    },

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("scan of {table} was cancelled")]
    Cancelled { table: String },

    #[error("invalid run transition: {from} -> {to}")]
    InvalidTransition { from: RunPhase, to: RunPhase },

    #[error(transparent)]
    Core(#[from] CoreError),
}
