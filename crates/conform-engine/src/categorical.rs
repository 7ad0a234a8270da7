//! Per-field, per-domain catalog of categorical values.

use std::collections::BTreeMap;

use conform_core::entities::{CategoricalField, ReferenceSchema};

use crate::scanner::TableSnapshot;

/// One domain's categorical values, keyed by column.
///
/// Only categorical fields whose column was sampled appear. Values are taken
/// as sampled; the scanner already ordered and truncated them.
#[must_use]
pub fn aggregate(
    schema: &ReferenceSchema,
    domain: &str,
    snapshot: &TableSnapshot,
) -> BTreeMap<String, CategoricalField> {
    schema
        .categorical_fields()
        .filter_map(|field| {
            let values = snapshot.categorical_samples.get(&field.column)?;
            Some((
                field.column.clone(),
                CategoricalField {
                    column: field.column.clone(),
                    field_id: field.field_id.clone(),
                    group: field.group.clone(),
                    by_domain: BTreeMap::from([(domain.to_string(), values.clone())]),
                },
            ))
        })
        .collect()
}

/// Run-wide catalog with an entry for every categorical field, keyed by field
/// name, and no domains yet.
#[must_use]
pub fn empty_catalog(schema: &ReferenceSchema) -> BTreeMap<String, CategoricalField> {
    schema
        .categorical_fields()
        .map(|field| {
            (
                field.name.clone(),
                CategoricalField {
                    column: field.column.clone(),
                    field_id: field.field_id.clone(),
                    group: field.group.clone(),
                    by_domain: BTreeMap::new(),
                },
            )
        })
        .collect()
}

/// Fold one domain's [`aggregate`] result into the run-wide catalog.
///
/// Each run starts from [`empty_catalog`], so entries from earlier runs are
/// replaced rather than merged.
pub fn merge_into(
    catalog: &mut BTreeMap<String, CategoricalField>,
    schema: &ReferenceSchema,
    aggregated: BTreeMap<String, CategoricalField>,
) {
    for (column, field) in aggregated {
        let Some(declared) = schema.field_for_column(&column) else {
            continue;
        };
        let entry = catalog
            .entry(declared.name.clone())
            .or_insert_with(|| CategoricalField {
                by_domain: BTreeMap::new(),
                ..field.clone()
            });
        entry.by_domain.extend(field.by_domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::entities::{CategoricalValue, SchemaField};
    use pretty_assertions::assert_eq;

    fn field(name: &str, column: &str, categorical: bool) -> SchemaField {
        SchemaField {
            name: name.into(),
            column: column.into(),
            field_type: "text".into(),
            field_id: categorical.then(|| format!("F-{column}")),
            group: categorical.then(|| "Segmentation".to_string()),
            is_key: false,
            is_categorical: categorical,
            description: None,
            tags: Vec::new(),
        }
    }

    fn schema() -> ReferenceSchema {
        ReferenceSchema {
            table_name: "contacts".into(),
            display_name: "Contacts".into(),
            fields: vec![
                field("Id", "id", false),
                field("Stage", "stage", true),
                field("Region", "region", true),
            ],
            freshness_column: None,
            ai_package: false,
            reference_domain: None,
            fuel_stage: None,
            description: None,
        }
    }

    fn snapshot(samples: &[(&str, Vec<CategoricalValue>)]) -> TableSnapshot {
        TableSnapshot {
            columns: vec!["id".into(), "stage".into(), "region".into()],
            row_count: 10,
            categorical_samples: samples
                .iter()
                .map(|(column, values)| ((*column).to_string(), values.clone()))
                .collect(),
            ..TableSnapshot::default()
        }
    }

    #[test]
    fn aggregate_copies_field_metadata() {
        let snap = snapshot(&[("stage", vec![CategoricalValue::new("lead", 7)])]);
        let aggregated = aggregate(&schema(), "acme", &snap);

        assert_eq!(aggregated.len(), 1);
        let stage = &aggregated["stage"];
        assert_eq!(stage.field_id.as_deref(), Some("F-stage"));
        assert_eq!(stage.group.as_deref(), Some("Segmentation"));
        assert_eq!(stage.by_domain["acme"], vec![CategoricalValue::new("lead", 7)]);
    }

    #[test]
    fn non_categorical_samples_are_ignored() {
        let snap = snapshot(&[("id", vec![CategoricalValue::new("1", 1)])]);
        assert!(aggregate(&schema(), "acme", &snap).is_empty());
    }

    #[test]
    fn merge_collects_domains_under_field_name() {
        let schema = schema();
        let mut catalog = empty_catalog(&schema);
        assert_eq!(catalog.keys().collect::<Vec<_>>(), ["Region", "Stage"]);

        let acme = snapshot(&[
            ("stage", vec![CategoricalValue::new("lead", 2)]),
            ("region", vec![CategoricalValue::new("emea", 2)]),
        ]);
        let globex = snapshot(&[("stage", vec![CategoricalValue::new("won", 5)])]);
        merge_into(&mut catalog, &schema, aggregate(&schema, "acme", &acme));
        merge_into(&mut catalog, &schema, aggregate(&schema, "globex", &globex));

        let stage_domains: Vec<&String> = catalog["Stage"].by_domain.keys().collect();
        assert_eq!(stage_domains, ["acme", "globex"]);
        let region_domains: Vec<&String> = catalog["Region"].by_domain.keys().collect();
        assert_eq!(region_domains, ["acme"]);
    }
}
