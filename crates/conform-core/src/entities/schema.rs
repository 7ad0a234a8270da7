use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One column of a reference schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SchemaField {
    /// Human-readable field name.
    pub name: String,
    /// Physical column name in the domain table.
    pub column: String,
    /// Declared column type (free-form, e.g. `text`, `date`, `integer`).
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub is_key: bool,
    #[serde(default)]
    pub is_categorical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Canonical table definition loaded from `schema.json`.
///
/// Field order is significant: it is the ordering basis every domain is
/// diffed against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReferenceSchema {
    pub table_name: String,
    pub display_name: String,
    pub fields: Vec<SchemaField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness_column: Option<String>,
    #[serde(default)]
    pub ai_package: bool,
    /// Slug of the domain whose table is the canonical column source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReferenceSchema {
    /// Physical column names in declared order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.column.as_str())
    }

    /// Fields flagged as categorical, in declared order.
    pub fn categorical_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|field| field.is_categorical)
    }

    /// Look up a field by its physical column name.
    #[must_use]
    pub fn field_for_column(&self, column: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.column == column)
    }

    #[must_use]
    pub fn is_reference_domain(&self, domain: &str) -> bool {
        self.reference_domain.as_deref() == Some(domain)
    }
}
