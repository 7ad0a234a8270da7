//! Schema loading and validation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the schema registry and the JSON Schema catalog.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No `schema.json` exists for the requested table.
    #[error("Reference schema not found for {entity}/{model} at {}", .path.display())]
    NotFound {
        entity: String,
        model: String,
        path: PathBuf,
    },

    /// The `schema.json` could not be parsed or failed validation.
    #[error("Malformed schema {}: {}", .path.display(), .problems.join("; "))]
    Malformed {
        path: PathBuf,
        /// Every problem found, in document order.
        problems: Vec<String>,
    },

    /// The schema file exists but could not be read.
    #[error("Failed to read schema {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested type name is not in the JSON Schema catalog.
    #[error("Unknown schema type: {0}")]
    UnknownType(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
