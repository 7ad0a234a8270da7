//! Report persistence error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A file operation on a report or its staging copy failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A persisted report could not be parsed.
    #[error("cannot parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// No scan results exist yet for the table.
    #[error("no scan results at {}", .path.display())]
    NotScanned { path: PathBuf },

    /// Another scan holds the table's write lock.
    #[error("another scan is writing {} ({}); waited {waited_secs}s", .path.display(), .pid.map_or_else(|| "unknown holder".to_string(), |pid| format!("pid {pid}")))]
    LockHeld {
        path: PathBuf,
        pid: Option<u32>,
        waited_secs: u64,
    },

    /// The filesystem refused the advisory lock.
    #[error("could not lock {}", .path.display())]
    LockUnavailable { path: PathBuf },

    /// A blocking persistence task panicked or was cancelled.
    #[error("persistence task failed: {0}")]
    Task(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
