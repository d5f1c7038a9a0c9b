//! Property-to-props dispatch.
//!
//! Maps each property type to the configuration object a generic input
//! renderer needs. The dispatch is an exhaustive match over the closed
//! [`PropertyType`] enumeration, so adding a type without a props builder
//! fails at compile time rather than at render time.

use crate::{DataRecord, FieldValue, ValueError, ValueResult};
use formwork_schema::{App, Entity, Property, PropertyType, Relation, RelationKind, SelectOption};
use std::collections::HashMap;

/// Props shared by every input.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonProps {
    /// Form field name — the property id.
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub help_text: Option<String>,
    pub disabled: bool,
}

/// Type-specific props, one variant per renderable property type.
#[derive(Debug, Clone, PartialEq)]
pub enum InputProps {
    Text {
        use_textarea: bool,
        default_value: Option<String>,
    },
    Number,
    Date,
    Email,
    Url,
    RichText,
    PhoneNumber,
    Currency,
    Formula,
    Switch,
    Range,
    Json,
    SingleSelect {
        options: Vec<SelectOption>,
        default_selected: Vec<String>,
    },
    MultipleSelect {
        options: Vec<SelectOption>,
        default_selected: Vec<String>,
    },
    Radio {
        options: Vec<SelectOption>,
    },
    Checkbox {
        options: Vec<SelectOption>,
    },
    Files {
        file_path_prefix: String,
    },
    Relation {
        target: Entity,
        relation: Relation,
        default_selected: Vec<String>,
    },
}

/// The complete props object handed to a [`crate::Resolvers`] input.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyProps {
    pub common: CommonProps,
    pub input: InputProps,
}

/// Caller-side per-property adjustments to a form.
#[derive(Debug, Clone, Default)]
pub struct FormOverrides {
    pub properties: HashMap<String, PropertyOverride>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyOverride {
    pub disabled: bool,
}

impl FormOverrides {
    fn disabled(&self, property_id: &str) -> bool {
        self.properties
            .get(property_id)
            .map(|o| o.disabled)
            .unwrap_or(false)
    }
}

/// Builds the props for rendering one property of an entity form.
///
/// `record` is the record being edited, if any; `app` resolves relation
/// targets. Auto-increment properties have no form input — they must be
/// filtered out upstream, and reaching the dispatcher with one is an error.
pub fn build_props_for_property(
    entity: &Entity,
    property: &Property,
    record: Option<&DataRecord>,
    app: &App,
    overrides: Option<&FormOverrides>,
) -> ValueResult<PropertyProps> {
    let common = common_props(entity, property, overrides);
    let input = match property.property_type {
        PropertyType::Text => InputProps::Text {
            use_textarea: property.config.use_textarea,
            default_value: property.config.default_value.clone(),
        },
        PropertyType::Number => InputProps::Number,
        PropertyType::Date => InputProps::Date,
        PropertyType::Email => InputProps::Email,
        PropertyType::Url => InputProps::Url,
        PropertyType::RichText => InputProps::RichText,
        PropertyType::PhoneNumber => InputProps::PhoneNumber,
        PropertyType::Currency => InputProps::Currency,
        PropertyType::Formula => InputProps::Formula,
        PropertyType::Switch => InputProps::Switch,
        PropertyType::Range => InputProps::Range,
        PropertyType::Json => InputProps::Json,
        PropertyType::SingleSelect => InputProps::SingleSelect {
            options: property.config.options.clone(),
            default_selected: selected_option_ids(property, record),
        },
        PropertyType::MultipleSelect => InputProps::MultipleSelect {
            options: property.config.options.clone(),
            default_selected: selected_option_ids(property, record),
        },
        PropertyType::Radio => InputProps::Radio {
            options: property.config.options.clone(),
        },
        PropertyType::Checkbox => InputProps::Checkbox {
            options: property.config.options.clone(),
        },
        PropertyType::Files => InputProps::Files {
            file_path_prefix: format!("entity/{}", entity.id),
        },
        PropertyType::Relation => relation_props(property, record, app)?,
        PropertyType::AutoIncrement => {
            return Err(ValueError::UnsupportedPropertyType(PropertyType::AutoIncrement))
        }
    };
    Ok(PropertyProps { common, input })
}

fn common_props(
    entity: &Entity,
    property: &Property,
    overrides: Option<&FormOverrides>,
) -> CommonProps {
    CommonProps {
        name: property.id.clone(),
        label: property.name.clone(),
        placeholder: format!("Type {} {}", entity.name, property.name),
        required: property.config.required,
        help_text: property.config.help_text.clone(),
        disabled: overrides.map(|o| o.disabled(&property.id)).unwrap_or(false),
    }
}

/// Ids of the currently selected options, resolved against the option
/// list so stale ids drop out.
fn selected_option_ids(property: &Property, record: Option<&DataRecord>) -> Vec<String> {
    let Some(raw) = record.and_then(|r| r.get(&property.id)) else {
        return Vec::new();
    };
    let selected: Vec<String> = match raw {
        FieldValue::List(items) => items.iter().filter_map(FieldValue::record_id).collect(),
        FieldValue::Null => Vec::new(),
        other => vec![other.to_text()],
    };
    selected
        .into_iter()
        .filter(|id| property.config.options.iter().any(|option| &option.id == id))
        .collect()
}

fn relation_props(
    property: &Property,
    record: Option<&DataRecord>,
    app: &App,
) -> ValueResult<InputProps> {
    let relation = property
        .relation()
        .ok_or_else(|| ValueError::UnknownRelationTarget(property.id.clone()))?;
    let target = app
        .entity(&relation.entity)
        .ok_or_else(|| ValueError::UnknownRelationTarget(relation.entity.clone()))?;

    let default_selected = match (record, relation.kind) {
        (Some(record), RelationKind::HasOne) => {
            // The record itself carries the related id; the sibling field
            // without the `_id` suffix holds the full related record.
            let sibling = property.id.strip_suffix("_id").unwrap_or(&property.id);
            record
                .get(sibling)
                .and_then(FieldValue::record_id)
                .into_iter()
                .filter(|id| !id.is_empty())
                .collect()
        }
        (Some(record), RelationKind::HasMany) => record
            .get(&property.id)
            .and_then(FieldValue::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(FieldValue::record_id)
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        (None, _) => Vec::new(),
    };

    Ok(InputProps::Relation {
        target: target.clone(),
        relation: relation.clone(),
        default_selected,
    })
}
