//! Semantic checks on a structurally valid [`ReferenceSchema`].

use std::collections::HashMap;

use conform_core::entities::ReferenceSchema;

/// Collect every semantic problem in `schema`, in field order.
///
/// An empty result means the schema is usable for a scan.
#[must_use]
pub fn semantic_problems(schema: &ReferenceSchema) -> Vec<String> {
    let mut problems = Vec::new();

    if schema.table_name.trim().is_empty() {
        problems.push("table_name is empty".to_string());
    }
    if schema.fields.is_empty() {
        problems.push("schema declares no fields".to_string());
    }

    let mut columns: HashMap<&str, usize> = HashMap::new();
    let mut names: HashMap<&str, usize> = HashMap::new();
    for (index, field) in schema.fields.iter().enumerate() {
        if field.column.trim().is_empty() {
            problems.push(format!("fields[{index}] has an empty column"));
        } else if let Some(first) = columns.insert(field.column.as_str(), index) {
            problems.push(format!(
                "duplicate column '{}' at fields[{first}] and fields[{index}]",
                field.column
            ));
        }

        if field.name.trim().is_empty() {
            problems.push(format!("fields[{index}] has an empty name"));
        } else if let Some(first) = names.insert(field.name.as_str(), index) {
            problems.push(format!(
                "duplicate field name '{}' at fields[{first}] and fields[{index}]",
                field.name
            ));
        }
    }

    if let Some(freshness) = schema.freshness_column.as_deref()
        && schema.field_for_column(freshness).is_none()
    {
        problems.push(format!(
            "freshness_column '{freshness}' is not a declared column"
        ));
    }

    if let Some(reference) = schema.reference_domain.as_deref()
        && reference.trim().is_empty()
    {
        problems.push("reference_domain is empty".to_string());
    }

    problems
}
