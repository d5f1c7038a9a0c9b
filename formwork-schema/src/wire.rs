//! Raw app-config payload as served by the backend.
//!
//! The backend describes entities by numeric id with a separate
//! `table_name`/`column_name`; the model uses those names as ids
//! throughout. [`map_app`] performs the translation.

use crate::{App, Entity, EntityConfig, Property, PropertyConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level payload of `GET {endpoint}/app-config/{app_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfigPayload {
    pub user: WireViewer,
    pub app: WireApp,
}

impl AppConfigPayload {
    /// Parses a payload from its JSON body.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// The requesting user, as seen by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct WireViewer {
    pub authenticated: bool,
    #[serde(default)]
    pub has_access: bool,
    #[serde(default)]
    pub grants: Vec<Grant>,
    #[serde(default)]
    pub id: Option<String>,
}

/// One access-control grant. Grants with `conditions` require row-level
/// context the client does not evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default)]
    pub id: i64,
    pub action: String,
    pub resource: String,
    #[serde(default)]
    pub attributes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

/// A named role and the grants it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireApp {
    pub id: i64,
    pub public_identifier: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organization_id: i64,
    /// Entities keyed by their numeric id; slots can be null.
    #[serde(default)]
    pub entities: HashMap<String, Option<WireEntity>>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEntity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub table_name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub enable_auto_save: bool,
    #[serde(default)]
    pub properties: Vec<WireProperty>,
    #[serde(default)]
    pub identity_property: Option<WireProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProperty {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: crate::PropertyType,
    pub column_name: String,
    #[serde(default)]
    pub config: Option<PropertyConfig>,
}

/// Translates the wire payload into the [`App`] model.
///
/// Entities are re-keyed by table name (their model id), properties by
/// column name. Null entity slots are skipped.
pub fn map_app(payload: &AppConfigPayload) -> App {
    let entities = payload
        .app
        .entities
        .values()
        .flatten()
        .map(|entity| (entity.table_name.clone(), map_entity(entity)))
        .collect();

    App {
        id: payload.app.public_identifier.clone(),
        name: payload.app.name.clone(),
        description: payload.app.description.clone(),
        entities,
    }
}

fn map_entity(entity: &WireEntity) -> Entity {
    Entity {
        id: entity.table_name.clone(),
        name: entity.name.clone(),
        description: entity.description.clone(),
        properties: entity.properties.iter().map(map_property).collect(),
        identity_property: entity.identity_property.as_ref().map(map_property),
        config: EntityConfig {
            hidden: entity.hidden,
            auto_save: entity.enable_auto_save,
        },
    }
}

fn map_property(property: &WireProperty) -> Property {
    Property {
        id: property.column_name.clone(),
        name: property.name.clone(),
        property_type: property.property_type,
        config: property.config.clone().unwrap_or_default(),
    }
}
