//! Record-to-form value mapping and minimal diffing.

use crate::{DataRecord, FieldValue};
use formwork_schema::{Entity, Property, PropertyType, RelationKind};
use std::collections::BTreeMap;

/// Form-ready values keyed by property id, plus the record id under `"id"`.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Computes the form-ready value mapping for a record.
///
/// Each property contributes one entry, normalized by its type; the record
/// id rides along under `"id"` so submissions can address the record.
pub fn values_for_record(entity: &Entity, record: &DataRecord) -> FormValues {
    let mut values = FormValues::new();
    values.insert("id".to_string(), FieldValue::Text(record.id.clone()));
    for property in &entity.properties {
        let (key, value) = initial_value_for_property(record, property);
        values.insert(key, value);
    }
    values
}

fn initial_value_for_property(record: &DataRecord, property: &Property) -> (String, FieldValue) {
    let key = property.id.clone();
    let raw = record.get(&property.id).cloned().unwrap_or(FieldValue::Null);
    match property.property_type {
        PropertyType::Switch => (key, FieldValue::Bool(raw.truthy())),
        PropertyType::Radio => (key, FieldValue::Text(raw.to_text())),
        PropertyType::Checkbox => (key, checked_option_ids(&raw)),
        PropertyType::MultipleSelect => (key, raw),
        PropertyType::Relation => relation_value(record, property, raw),
        _ => {
            // Scalars default to the empty string when absent.
            let value = if raw.is_null() { FieldValue::Text(String::new()) } else { raw };
            (key, value)
        }
    }
}

/// Checkbox raw values are lists of `{id}` records; the form wants the ids.
fn checked_option_ids(raw: &FieldValue) -> FieldValue {
    match raw.as_list() {
        Some(items) => FieldValue::List(
            items
                .iter()
                .filter_map(FieldValue::record_id)
                .map(FieldValue::Text)
                .collect(),
        ),
        None => FieldValue::Null,
    }
}

fn relation_value(
    record: &DataRecord,
    property: &Property,
    raw: FieldValue,
) -> (String, FieldValue) {
    let key = property.id.clone();
    let Some(relation) = property.relation() else {
        return (key, raw);
    };
    match relation.kind {
        RelationKind::HasMany => {
            let value = match raw.as_list() {
                Some(items) => FieldValue::List(
                    items
                        .iter()
                        .filter_map(FieldValue::record_id)
                        .map(FieldValue::Text)
                        .collect(),
                ),
                None => FieldValue::Null,
            };
            (key, value)
        }
        RelationKind::HasOne => {
            // The related record rides on a sibling field named without
            // the `_id` suffix; its id is the form value.
            let sibling = property.id.strip_suffix("_id").unwrap_or(&property.id);
            let value = record
                .get(sibling)
                .and_then(FieldValue::record_id)
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Null);
            (key, value)
        }
    }
}

/// Shallow diff between two form value mappings, limited to top-level keys.
///
/// The result holds only the keys whose values differ, taken from `values`
/// (keys present only in `defaults` surface as [`FieldValue::Null`]).
/// Diffing a mapping against itself yields an empty result.
pub fn form_value_diff(defaults: &FormValues, values: &FormValues) -> FormValues {
    let mut diff = FormValues::new();
    for key in defaults.keys().chain(values.keys()) {
        if diff.contains_key(key) {
            continue;
        }
        let before = defaults.get(key).unwrap_or(&FieldValue::Null);
        let after = values.get(key).unwrap_or(&FieldValue::Null);
        if before != after {
            diff.insert(key.clone(), after.clone());
        }
    }
    diff
}
