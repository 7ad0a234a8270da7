//! `(entity, model)` addressing and the on-disk layout of a table directory.
//!
//! ```text
//! <root>/<entity>/<model>/schema.json        reference schema (input)
//!                        /domains.json       DomainsFile (output)
//!                        /categoricals.json  CategoricalsFile (output)
//!                        /schema.md          generated documentation
//!                        /.scan.lock         single-writer lock
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

pub const SCHEMA_FILE: &str = "schema.json";
pub const DOMAINS_FILE: &str = "domains.json";
pub const CATEGORICALS_FILE: &str = "categoricals.json";
pub const MARKDOWN_FILE: &str = "schema.md";
pub const LOCK_FILE: &str = ".scan.lock";

/// Address of one reference table under a schemas root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableAddress {
    root: PathBuf,
    entity: String,
    model: String,
}

impl TableAddress {
    /// Build an address from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSegment`] if `entity` or `model` is empty,
    /// is a relative path component, or contains a path separator.
    pub fn new(
        root: impl Into<PathBuf>,
        entity: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let entity = entity.into();
        let model = model.into();
        validate_segment(&entity)?;
        validate_segment(&model)?;
        Ok(Self {
            root: root.into(),
            entity,
            model,
        })
    }

    /// Recover the address from a path to a `schema.json` file.
    ///
    /// The file's parent directory is the model, its grandparent the entity,
    /// and the directory above that the schemas root.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSchemaPath`] if the path is too shallow.
    pub fn from_schema_path(path: &Path) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidSchemaPath {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let model_dir = path.parent().ok_or_else(|| invalid("no model directory"))?;
        let entity_dir = model_dir
            .parent()
            .ok_or_else(|| invalid("no entity directory"))?;
        let root = entity_dir.parent().unwrap_or_else(|| Path::new(""));

        let model = dir_name(model_dir).ok_or_else(|| invalid("model directory has no name"))?;
        let entity = dir_name(entity_dir).ok_or_else(|| invalid("entity directory has no name"))?;

        Self::new(root, entity, model)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// `entity/model`, the key used by domain registries.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.entity, self.model)
    }

    #[must_use]
    pub fn table_dir(&self) -> PathBuf {
        self.root.join(&self.entity).join(&self.model)
    }

    #[must_use]
    pub fn schema_path(&self) -> PathBuf {
        self.table_dir().join(SCHEMA_FILE)
    }

    #[must_use]
    pub fn domains_path(&self) -> PathBuf {
        self.table_dir().join(DOMAINS_FILE)
    }

    #[must_use]
    pub fn categoricals_path(&self) -> PathBuf {
        self.table_dir().join(CATEGORICALS_FILE)
    }

    #[must_use]
    pub fn markdown_path(&self) -> PathBuf {
        self.table_dir().join(MARKDOWN_FILE)
    }

    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.table_dir().join(LOCK_FILE)
    }
}

impl fmt::Display for TableAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity, self.model)
    }
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn validate_segment(segment: &str) -> Result<(), CoreError> {
    let invalid = |reason: &str| CoreError::InvalidSegment {
        segment: segment.to_string(),
        reason: reason.to_string(),
    };
    if segment.trim().is_empty() {
        return Err(invalid("empty"));
    }
    if segment == "." || segment == ".." {
        return Err(invalid("relative path component"));
    }
    if segment.contains(['/', '\\']) {
        return Err(invalid("contains a path separator"));
    }
    Ok(())
}
