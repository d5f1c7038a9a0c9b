//! Schema model for Formwork.
//!
//! Defines the static description of an application that every other
//! Formwork crate consumes:
//! - [`App`] — the loaded application: entities keyed by entity id
//! - [`Entity`] — one logical table/collection
//! - [`Property`] — one typed field on an entity, with a closed
//!   [`PropertyType`] enumeration that drives value normalization and
//!   form-props dispatch downstream
//! - [`AppLifecycle`] — the lifecycle state machine every consumer shares
//! - [`wire`] — the raw app-config payload the backend serves, and
//!   [`wire::map_app`] which translates it into the model above
//!
//! The model is immutable once loaded; an app reload replaces it wholesale.

mod app;
mod entity;
mod lifecycle;
mod property;
mod user;
pub mod wire;

pub use app::App;
pub use entity::{Entity, EntityConfig};
pub use lifecycle::AppLifecycle;
pub use property::{Property, PropertyConfig, PropertyType, Relation, RelationKind, SelectOption};
pub use user::User;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or mapping a schema.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The app-config payload did not parse. Unknown property type strings
    /// surface here, with serde naming the unexpected variant.
    #[error("invalid app config: {0}")]
    InvalidAppConfig(#[from] serde_json::Error),
}
