use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ConformanceStatus;

/// A single column-level difference between a domain and the reference.
///
/// `missing` entries carry only the reference coordinates, `extra` entries
/// only the domain coordinates, order mismatches carry both.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ColumnDiff {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// 1-based position in the reference schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_position: Option<usize>,
    /// 1-based position in the domain table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_position: Option<usize>,
    /// 0-based index in the reference schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_index: Option<usize>,
    /// 0-based index in the domain table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_index: Option<usize>,
}

impl ColumnDiff {
    /// A reference column absent from the domain.
    #[must_use]
    pub fn missing(column: &str, display_name: Option<&str>, ref_index: usize) -> Self {
        Self {
            column: column.to_string(),
            display_name: display_name.map(str::to_string),
            ref_position: Some(ref_index + 1),
            domain_position: None,
            ref_index: Some(ref_index),
            domain_index: None,
        }
    }

    /// A domain column the reference does not declare.
    #[must_use]
    pub fn extra(column: &str, domain_index: usize) -> Self {
        Self {
            column: column.to_string(),
            display_name: None,
            ref_position: None,
            domain_position: Some(domain_index + 1),
            ref_index: None,
            domain_index: Some(domain_index),
        }
    }

    /// A shared column found at a different relative position.
    #[must_use]
    pub fn displaced(
        column: &str,
        display_name: Option<&str>,
        ref_index: usize,
        domain_index: usize,
    ) -> Self {
        Self {
            column: column.to_string(),
            display_name: display_name.map(str::to_string),
            ref_position: Some(ref_index + 1),
            domain_position: Some(domain_index + 1),
            ref_index: Some(ref_index),
            domain_index: Some(domain_index),
        }
    }
}

/// Structural verdict for one domain's table against the reference schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StructuralConformance {
    pub status: ConformanceStatus,
    pub ref_columns: usize,
    pub domain_columns: usize,
    pub missing: Vec<ColumnDiff>,
    pub extra: Vec<ColumnDiff>,
    pub order_mismatches: Vec<ColumnDiff>,
}

impl StructuralConformance {
    /// Whether the column set and relative order match the reference exactly.
    #[must_use]
    pub fn is_structurally_equal(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.order_mismatches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_carries_reference_coordinates_only() {
        let diff = ColumnDiff::missing("status", Some("Status"), 2);
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["ref_position"], 3);
        assert_eq!(json["ref_index"], 2);
        assert!(json.get("domain_position").is_none());
        assert!(json.get("domain_index").is_none());
    }

    #[test]
    fn extra_carries_domain_coordinates_only() {
        let diff = ColumnDiff::extra("region", 3);
        assert_eq!(diff.domain_position, Some(4));
        assert_eq!(diff.domain_index, Some(3));
        assert!(diff.ref_position.is_none());
        assert!(diff.display_name.is_none());
    }
}
