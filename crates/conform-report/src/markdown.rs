//! `schema.md` rendering.
//!
//! Output depends only on the schema, so regenerating an unchanged schema
//! produces byte-identical documentation.

use std::fmt::Write;

use conform_core::entities::{ReferenceSchema, SchemaField};

/// Render the reference schema as markdown.
#[must_use]
pub fn generate_schema_markdown(schema: &ReferenceSchema) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", cell(&schema.display_name));
    if let Some(description) = schema.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "{}\n", description.trim());
    }

    out.push_str("| Property | Value |\n|---|---|\n");
    let _ = writeln!(out, "| Table | `{}` |", cell(&schema.table_name));
    if let Some(domain) = &schema.reference_domain {
        let _ = writeln!(out, "| Reference domain | `{}` |", cell(domain));
    }
    if let Some(column) = &schema.freshness_column {
        let _ = writeln!(out, "| Freshness column | `{}` |", cell(column));
    }
    if let Some(stage) = &schema.fuel_stage {
        let _ = writeln!(out, "| Fuel stage | {} |", cell(stage));
    }
    let _ = writeln!(out, "| AI package | {} |", yes_no(schema.ai_package));
    let _ = writeln!(out, "| Fields | {} |", schema.fields.len());

    out.push_str("\n## Fields\n\n");
    out.push_str("| # | Name | Column | Type | Key | Categorical | Group | Description |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for (index, field) in schema.fields.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | `{}` | {} | {} | {} | {} | {} |",
            index + 1,
            cell(&field.name),
            cell(&field.column),
            cell(&field.field_type),
            yes_no(field.is_key),
            yes_no(field.is_categorical),
            cell(field.group.as_deref().unwrap_or("")),
            cell(field.description.as_deref().unwrap_or("")),
        );
    }

    let keys: Vec<&SchemaField> = schema.fields.iter().filter(|f| f.is_key).collect();
    if !keys.is_empty() {
        out.push_str("\n## Keys\n\n");
        for field in keys {
            let _ = writeln!(out, "- `{}` ({})", cell(&field.column), cell(&field.name));
        }
    }

    let categoricals: Vec<&SchemaField> = schema.categorical_fields().collect();
    if !categoricals.is_empty() {
        out.push_str("\n## Categorical fields\n\n");
        for field in categoricals {
            let _ = write!(out, "- `{}` ({})", cell(&field.column), cell(&field.name));
            if let Some(id) = &field.field_id {
                let _ = write!(out, ", field id `{}`", cell(id));
            }
            if !field.tags.is_empty() {
                let _ = write!(out, ", tags: {}", cell(&field.tags.join(", ")));
            }
            out.push('\n');
        }
    }

    out
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "" }
}

/// Make text safe inside a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
