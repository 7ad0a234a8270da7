//! Structural comparison of a domain's columns against the reference schema.

use std::collections::{HashMap, HashSet};

use conform_core::entities::{ColumnDiff, ReferenceSchema, StructuralConformance};
use conform_core::enums::ConformanceStatus;

use crate::scanner::TableSnapshot;

/// Compare `snapshot.columns` with the schema's declared column order.
///
/// Order is judged on the columns both sides share, projected to that shared
/// set, so a missing or extra column never shifts every later column into a
/// mismatch. Reported indices are positions in the full lists. The reference
/// domain still gets its differences listed; only its status is forced.
#[must_use]
pub fn compute(
    schema: &ReferenceSchema,
    snapshot: &TableSnapshot,
    is_reference_domain: bool,
) -> StructuralConformance {
    let ref_cols: Vec<&str> = schema.columns().collect();

    let mut domain_index: HashMap<&str, usize> = HashMap::with_capacity(snapshot.columns.len());
    let mut domain_cols: Vec<&str> = Vec::with_capacity(snapshot.columns.len());
    for (index, column) in snapshot.columns.iter().enumerate() {
        if !domain_index.contains_key(column.as_str()) {
            domain_index.insert(column.as_str(), index);
            domain_cols.push(column.as_str());
        }
    }
    let ref_set: HashSet<&str> = ref_cols.iter().copied().collect();

    let display_name = |ref_idx: usize| schema.fields.get(ref_idx).map(|f| f.name.as_str());

    let missing: Vec<ColumnDiff> = ref_cols
        .iter()
        .enumerate()
        .filter(|(_, column)| !domain_index.contains_key(*column))
        .map(|(i, column)| ColumnDiff::missing(column, display_name(i), i))
        .collect();

    let extra: Vec<ColumnDiff> = domain_cols
        .iter()
        .filter(|column| !ref_set.contains(*column))
        .map(|column| ColumnDiff::extra(column, domain_index[column]))
        .collect();

    let shared_ref = ref_cols
        .iter()
        .enumerate()
        .filter(|(_, column)| domain_index.contains_key(*column));
    let shared_dom = domain_cols.iter().filter(|column| ref_set.contains(*column));

    let order_mismatches: Vec<ColumnDiff> = shared_ref
        .zip(shared_dom)
        .filter(|((_, expected), actual)| expected != actual)
        .map(|((i, column), _)| {
            ColumnDiff::displaced(column, display_name(i), i, domain_index[column])
        })
        .collect();

    let status = if is_reference_domain {
        ConformanceStatus::Reference
    } else if missing.is_empty() && extra.is_empty() && order_mismatches.is_empty() {
        ConformanceStatus::Aligned
    } else {
        ConformanceStatus::Diverged
    };

    StructuralConformance {
        status,
        ref_columns: ref_cols.len(),
        domain_columns: domain_cols.len(),
        missing,
        extra,
        order_mismatches,
    }
}
