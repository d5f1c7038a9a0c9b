use crate::Entity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The loaded application schema.
///
/// Immutable once loaded from the backend; an app reload replaces the
/// whole value rather than patching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Public identifier of the app.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entities keyed by entity id (the backend table name).
    pub entities: HashMap<String, Entity>,
}

impl App {
    /// Looks up an entity by id.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }
}
