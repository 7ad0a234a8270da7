//! Loads reference schemas from the `<root>/<entity>/<model>/schema.json` tree.

use std::path::{Path, PathBuf};

use conform_core::address::TableAddress;
use conform_core::entities::ReferenceSchema;
use schemars::schema_for;

use crate::catalog::validation_errors;
use crate::error::SchemaError;
use crate::validate::semantic_problems;

/// Read-only access to the reference schema tree.
///
/// Loading is a pure read; nothing is cached between calls so edits to a
/// `schema.json` are picked up by the next scan.
pub struct SchemaRegistry {
    root: PathBuf,
    document_schema: serde_json::Value,
}

impl SchemaRegistry {
    /// Create a registry rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Generation`] if the document schema for
    /// [`ReferenceSchema`] cannot be produced.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        let document_schema = serde_json::to_value(schema_for!(ReferenceSchema))
            .map_err(|e| SchemaError::Generation(format!("reference_schema: {e}")))?;
        Ok(Self {
            root: root.into(),
            document_schema,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the reference schema for `(entity, model)`.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::NotFound`] when `schema.json` does not exist
    /// - [`SchemaError::Malformed`] when it does not parse or fails validation
    /// - [`SchemaError::Io`] for any other read failure
    pub fn load(&self, entity: &str, model: &str) -> Result<ReferenceSchema, SchemaError> {
        let address = TableAddress::new(&self.root, entity, model).map_err(|e| {
            SchemaError::Malformed {
                path: self.root.join(entity).join(model),
                problems: vec![e.to_string()],
            }
        })?;
        self.load_address(&address)
    }

    /// Load the reference schema at a resolved [`TableAddress`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_address(&self, address: &TableAddress) -> Result<ReferenceSchema, SchemaError> {
        let path = address.schema_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SchemaError::NotFound {
                    entity: address.entity().to_string(),
                    model: address.model().to_string(),
                    path,
                });
            }
            Err(source) => return Err(SchemaError::Io { path, source }),
        };
        self.parse(&path, &raw)
    }

    /// Load a schema from an explicit file path, bypassing the tree layout.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`]; `NotFound` carries empty entity/model segments
    /// when the path does not follow the layout.
    pub fn load_path(&self, path: &Path) -> Result<ReferenceSchema, SchemaError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let (entity, model) = TableAddress::from_schema_path(path).map_or_else(
                    |_| (String::new(), String::new()),
                    |addr| (addr.entity().to_string(), addr.model().to_string()),
                );
                return Err(SchemaError::NotFound {
                    entity,
                    model,
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(SchemaError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        self.parse(path, &raw)
    }

    /// Parse and validate a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] with every problem found.
    pub fn parse(&self, path: &Path, raw: &str) -> Result<ReferenceSchema, SchemaError> {
        let malformed = |problems: Vec<String>| SchemaError::Malformed {
            path: path.to_path_buf(),
            problems,
        };

        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| malformed(vec![format!("invalid JSON: {e}")]))?;

        let structural = validation_errors(&self.document_schema, &value)?;
        if !structural.is_empty() {
            return Err(malformed(structural));
        }

        let schema: ReferenceSchema =
            serde_json::from_value(value).map_err(|e| malformed(vec![e.to_string()]))?;

        let problems = semantic_problems(&schema);
        if !problems.is_empty() {
            return Err(malformed(problems));
        }

        tracing::debug!(
            path = %path.display(),
            table = %schema.table_name,
            fields = schema.fields.len(),
            "loaded reference schema"
        );
        Ok(schema)
    }
}
