//! Headless form orchestration for a single entity record.
//!
//! `prepare` fetches the record (when editing), caches it in the store's
//! data block, derives default form values, and builds the per-property
//! input props. `submit` sends the minimal diff for edits and the full
//! value set for creates, then folds the saved result back into the data
//! block.

use crate::orchestrator::AppOrchestrator;
use crate::state::Action;
use crate::{StateError, StateResult};
use formwork_schema::{Entity, Property, PropertyType};
use formwork_values::{
    build_props_for_property, form_value_diff, values_for_record, DataRecord, FormOverrides,
    FormValues, PropertyProps,
};
use tracing::debug;

/// One renderable form field: the schema property plus the input props
/// the dispatcher built for it.
#[derive(Debug, Clone)]
pub struct FormField {
    pub property: Property,
    pub props: PropertyProps,
}

/// A prepared form for creating or editing one record of an entity.
#[derive(Debug)]
pub struct EntityFormModel {
    entity: Entity,
    record_id: Option<String>,
    defaults: FormValues,
    fields: Vec<FormField>,
}

impl EntityFormModel {
    /// Builds the form model. With a `record_id` the record is fetched
    /// first and cached in the data block; without one the form starts
    /// empty (create mode).
    ///
    /// Properties without a form input (auto-increment) are filtered out
    /// here, before dispatch, so `prepare` never trips the dispatcher's
    /// unsupported-type error for a well-formed schema.
    pub async fn prepare(
        orchestrator: &AppOrchestrator,
        entity_id: &str,
        record_id: Option<&str>,
        overrides: Option<&FormOverrides>,
    ) -> StateResult<Self> {
        let app = orchestrator.store().app().ok_or(StateError::AppNotLoaded)?;
        let entity = app
            .entity(entity_id)
            .ok_or_else(|| StateError::UnknownEntity(entity_id.to_string()))?
            .clone();

        let record = match record_id {
            Some(id) => {
                let record = orchestrator.provider().single_record(&entity, id).await?;
                orchestrator.store().dispatch(Action::SetDataBlockRecord {
                    entity_id: entity.id.clone(),
                    record: record.clone(),
                });
                Some(record)
            }
            None => None,
        };

        let defaults = match &record {
            Some(record) => values_for_record(&entity, record),
            None => FormValues::new(),
        };

        let mut fields = Vec::new();
        for property in &entity.properties {
            if property.property_type == PropertyType::AutoIncrement {
                continue;
            }
            let props =
                build_props_for_property(&entity, property, record.as_ref(), &app, overrides)?;
            fields.push(FormField {
                property: property.clone(),
                props,
            });
        }
        debug!(entity = %entity.id, editing = record.is_some(), fields = fields.len(), "form prepared");

        Ok(Self {
            entity,
            record_id: record.map(|record| record.id),
            defaults,
            fields,
        })
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// `Some` in edit mode, `None` in create mode.
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// The form's initial values, derived from the fetched record. Empty
    /// in create mode.
    pub fn defaults(&self) -> &FormValues {
        &self.defaults
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Persists `values`. In edit mode only the keys whose value differs
    /// from the prepared defaults go into the PATCH body; an unchanged
    /// form skips the network round trip and returns the cached record.
    /// The saved result is folded back into the entity's data block.
    pub async fn submit(
        &self,
        orchestrator: &AppOrchestrator,
        values: &FormValues,
    ) -> StateResult<DataRecord> {
        match &self.record_id {
            Some(id) => {
                let mut diff = form_value_diff(&self.defaults, values);
                diff.remove("id");
                if diff.is_empty() {
                    debug!(entity = %self.entity.id, record = %id, "submit skipped, no changes");
                    if let Some(cached) = orchestrator
                        .store()
                        .data_block_record(&self.entity.id, id)
                    {
                        return Ok(cached);
                    }
                    return Ok(DataRecord::new(id.clone()));
                }
                let mut patch = DataRecord::new(id.clone());
                patch.fields = diff;
                let saved = orchestrator
                    .provider()
                    .save_record(&self.entity, &patch)
                    .await?;
                orchestrator.store().dispatch(Action::SetDataBlockRecord {
                    entity_id: self.entity.id.clone(),
                    record: saved.clone(),
                });
                Ok(saved)
            }
            None => {
                let mut record = DataRecord::new("");
                for (key, value) in values {
                    if key != "id" {
                        record.fields.insert(key.clone(), value.clone());
                    }
                }
                let created = orchestrator
                    .provider()
                    .create_record(&self.entity, &record)
                    .await?;
                orchestrator.store().dispatch(Action::SetDataBlockRecord {
                    entity_id: self.entity.id.clone(),
                    record: created.clone(),
                });
                Ok(created)
            }
        }
    }
}
