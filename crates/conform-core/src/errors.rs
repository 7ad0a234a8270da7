//! Cross-cutting error types.
//!
//! Crate-specific errors (`SchemaError`, `StorageError`, `ReportError`, ...) live
//! in their own crates. A unified error is deferred to `conform-cli`, where all
//! crate errors converge into `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving a table's location on disk.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A schema path does not follow the `<root>/<entity>/<model>/schema.json` layout.
    #[error("Invalid schema path {path}: {reason}")]
    InvalidSchemaPath { path: PathBuf, reason: String },

    /// An entity or model segment is empty or contains path separators.
    #[error("Invalid table address segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },
}
