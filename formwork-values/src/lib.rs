//! Typed record values and form data mapping for Formwork.
//!
//! Three layers, all pure:
//! - [`FieldValue`] / [`DataRecord`] — a typed value variant replacing the
//!   loose JSON the backend speaks, with ids normalized to strings at the
//!   conversion boundary
//! - [`values_for_record`] / [`form_value_diff`] — translate raw records
//!   into form-ready values and compute minimal PATCH payloads
//! - [`build_props_for_property`] — exhaustive dispatch from a property's
//!   type to the configuration a generic input renderer needs
//!
//! Rendering itself stays behind the caller-supplied [`Resolvers`] trait.

mod mapper;
mod props;
mod resolvers;
mod value;

pub use mapper::{form_value_diff, values_for_record, FormValues};
pub use props::{
    build_props_for_property, CommonProps, FormOverrides, InputProps, PropertyOverride,
    PropertyProps,
};
pub use resolvers::Resolvers;
pub use value::{DataRecord, FieldValue};

/// Result type alias using the crate's error type.
pub type ValueResult<T> = std::result::Result<T, ValueError>;

/// Errors raised at the value-mapping and props-dispatch boundaries.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// A record payload was not a JSON object.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// A record payload carried no id field.
    #[error("record has no id")]
    MissingId,

    /// The dispatcher was asked to build input props for a property type
    /// that has no form input. Reaching this is a schema error: such
    /// properties must be filtered out before form building.
    #[error("property type {0} is not supported")]
    UnsupportedPropertyType(formwork_schema::PropertyType),

    /// A relation property points at an entity the app schema lacks.
    #[error("relation target entity not found: {0}")]
    UnknownRelationTarget(String),
}
