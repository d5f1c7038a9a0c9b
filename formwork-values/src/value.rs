use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed field value.
///
/// Records arrive from the backend as loose JSON; this variant is the
/// in-memory form, converted once at the boundary. JSON objects become
/// [`FieldValue::Record`], arrays become [`FieldValue::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    Record(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Truthiness coercion used for switch values: null, false, zero, the
    /// empty string, and empty collections are false.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Record(fields) => !fields.is_empty(),
        }
    }

    /// String coercion used for radio values and id normalization.
    /// Whole numbers print without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
            Self::List(_) | Self::Record(_) => String::new(),
        }
    }

    /// The `id` of a nested record, coerced to text. For scalar values the
    /// value itself is the id (relation lists mix both shapes).
    pub fn record_id(&self) -> Option<String> {
        match self {
            Self::Record(fields) => fields.get("id").map(FieldValue::to_text),
            Self::Null => None,
            other => Some(other.to_text()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Record(
                fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::List(items) => {
                serde_json::Value::Array(items.iter().map(Self::from).collect())
            }
            FieldValue::Record(fields) => serde_json::Value::Object(
                fields.iter().map(|(k, v)| (k.clone(), Self::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One record of an entity, keyed by property id.
///
/// `id` is held apart from the fields and always as a string — numeric ids
/// are coerced when the record crosses the JSON boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl DataRecord {
    /// Creates an empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Converts a backend JSON object into a record, normalizing the id to
    /// its string form.
    pub fn from_json(value: &serde_json::Value) -> crate::ValueResult<Self> {
        let object = value.as_object().ok_or(crate::ValueError::NotAnObject)?;
        let id = object
            .get("id")
            .filter(|v| !v.is_null())
            .ok_or(crate::ValueError::MissingId)?;
        let id = FieldValue::from(id.clone()).to_text();

        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), FieldValue::from(value.clone())))
            .collect();

        Ok(Self { id, fields })
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Shallow-merges another field mapping over this record's fields.
    /// Used by the data-block upsert: existing fields survive unless the
    /// incoming mapping names them.
    pub fn merge_fields(&mut self, fields: &BTreeMap<String, FieldValue>) {
        for (key, value) in fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Full JSON form, id included.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("id".to_string(), serde_json::Value::String(self.id.clone()));
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.into());
        }
        serde_json::Value::Object(object)
    }

    /// JSON body for partial updates: fields only, id excluded.
    pub fn body_json(&self) -> serde_json::Value {
        let object = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.into()))
            .collect();
        serde_json::Value::Object(object)
    }
}
