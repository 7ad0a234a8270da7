//! JSON Schema catalog for every persisted or emitted type.
//!
//! Schemas are built from `conform-core` types with [`schemars::schema_for!`]
//! at construction time and validated with `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Name-addressable JSON Schemas.
pub struct JsonSchemas {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty))
                .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?,
        );
    };
}

impl JsonSchemas {
    /// Build the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Generation`] if a generated schema cannot be
    /// converted to JSON.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::new();

        // --- Inputs ---
        register!(
            schemas,
            "reference_schema",
            conform_core::entities::ReferenceSchema
        );
        register!(schemas, "domain_ref", conform_core::entities::DomainRef);

        // --- Persisted roots ---
        register!(schemas, "domains_file", conform_core::entities::DomainsFile);
        register!(
            schemas,
            "categoricals_file",
            conform_core::entities::CategoricalsFile
        );

        // --- Command responses ---
        register!(
            schemas,
            "scan_table_response",
            conform_core::responses::ScanTableResponse
        );
        register!(
            schemas,
            "schema_doc_response",
            conform_core::responses::SchemaDocResponse
        );
        register!(
            schemas,
            "schema_validate_response",
            conform_core::responses::SchemaValidateResponse
        );
        register!(
            schemas,
            "table_report_response",
            conform_core::responses::TableReportResponse
        );

        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownType` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))?;

        let errors = validation_errors(schema, instance)?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Collect every validation message for `instance` against `schema`.
pub(crate) fn validation_errors(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Result<Vec<String>, SchemaError> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| SchemaError::Generation(format!("{e}")))?;
    Ok(validator
        .iter_errors(instance)
        .map(|e| {
            let at = e.instance_path.to_string();
            if at.is_empty() {
                format!("{e}")
            } else {
                format!("{at}: {e}")
            }
        })
        .collect())
}
