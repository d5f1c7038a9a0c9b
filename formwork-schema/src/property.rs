use serde::{Deserialize, Serialize};
use std::fmt;

/// The data type of a property.
///
/// A closed set: every variant has a matching value-normalization branch
/// and props builder downstream. Wire payloads use the snake_case names;
/// an unknown string fails deserialization naming the offending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Text,
    Number,
    Date,
    Email,
    Url,
    RichText,
    PhoneNumber,
    SingleSelect,
    Files,
    Radio,
    Currency,
    Formula,
    MultipleSelect,
    Checkbox,
    Switch,
    Range,
    Relation,
    AutoIncrement,
    Json,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the wire spelling.
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
            Self::Url => "url",
            Self::RichText => "rich_text",
            Self::PhoneNumber => "phone_number",
            Self::SingleSelect => "single_select",
            Self::Files => "files",
            Self::Radio => "radio",
            Self::Currency => "currency",
            Self::Formula => "formula",
            Self::MultipleSelect => "multiple_select",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::Range => "range",
            Self::Relation => "relation",
            Self::AutoIncrement => "auto_increment",
            Self::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// One option of a select/radio/checkbox property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
}

/// Whether a relation points at one record or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    HasOne,
    HasMany,
}

/// Link from a relation property to its target entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Id of the target entity in [`crate::App::entities`].
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

/// Per-property configuration. All fields optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyConfig {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub use_textarea: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

/// One typed field definition on an [`crate::Entity`].
///
/// `id` is the column name records key their values by; `property_type`
/// selects which normalization and props-building logic applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub config: PropertyConfig,
}

impl Property {
    /// Creates a property with an empty config.
    pub fn new(id: impl Into<String>, name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            property_type,
            config: PropertyConfig::default(),
        }
    }

    /// The relation config, if this is a relation property.
    pub fn relation(&self) -> Option<&Relation> {
        self.config.relation.as_ref()
    }
}
