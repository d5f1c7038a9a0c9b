use crate::Property;
use serde::{Deserialize, Serialize};

/// Entity-level behavior flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Hidden entities are excluded from navigation, not from the API.
    #[serde(default)]
    pub hidden: bool,
    /// Forms over this entity persist field changes as they happen.
    #[serde(default)]
    pub auto_save: bool,
}

/// Schema definition of one record collection (analogous to a table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Table name; also the key of this entity in [`crate::App::entities`]
    /// and the data-block id for its record cache.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Vec<Property>,
    /// The property that labels a record (shown in lists, relation pickers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_property: Option<Property>,
    #[serde(default)]
    pub config: EntityConfig,
}

impl Entity {
    /// Looks up a property by id.
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }
}
