//! Scripted in-memory backend for orchestrator and form tests.

#![allow(dead_code)]

use async_trait::async_trait;
use formwork_provider::{
    AppLoadError, AuthorizerAction, AuthorizerContext, BackendProvider, FilePayload, ProviderError,
    ProviderResult, UploadControl,
};
use formwork_schema::{App, Entity, EntityConfig, Property, PropertyType, User};
use formwork_values::DataRecord;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn user() -> User {
    User {
        id: "user-1".to_string(),
        email: "ann@example.com".to_string(),
        name: "Ann".to_string(),
    }
}

pub fn contacts_entity() -> Entity {
    Entity {
        id: "contacts".to_string(),
        name: "Contacts".to_string(),
        description: None,
        properties: vec![
            Property::new("name", "Name", PropertyType::Text),
            Property::new("age", "Age", PropertyType::Number),
            Property::new("newsletter", "Newsletter", PropertyType::Switch),
            Property::new("seq", "Seq", PropertyType::AutoIncrement),
        ],
        identity_property: Some(Property::new("name", "Name", PropertyType::Text)),
        config: EntityConfig::default(),
    }
}

pub fn demo_app() -> App {
    App {
        id: "demo".to_string(),
        name: "Demo".to_string(),
        description: None,
        entities: HashMap::from([("contacts".to_string(), contacts_entity())]),
    }
}

/// What the scripted `load_app` should do.
pub enum LoadOutcome {
    Ready,
    SignInRequired,
    Fail,
}

/// In-memory [`BackendProvider`] with call counters and a scriptable
/// load outcome. `sign_in` with the configured password flips the
/// outcome to `Ready`, mirroring a session coming alive.
pub struct ScriptedProvider {
    pub app: App,
    pub outcome: Mutex<LoadOutcome>,
    pub session: Mutex<Option<User>>,
    pub account: User,
    pub password: String,
    pub records: Mutex<HashMap<String, Vec<DataRecord>>>,
    pub load_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub last_patch: Mutex<Option<DataRecord>>,
    pub load_delay: Option<Duration>,
    pub sign_out_fails: bool,
    next_id: AtomicUsize,
}

impl ScriptedProvider {
    pub fn ready_with_session() -> Self {
        let mut provider = Self::new(LoadOutcome::Ready);
        *provider.session.get_mut().unwrap() = Some(user());
        provider
    }

    pub fn new(outcome: LoadOutcome) -> Self {
        Self {
            app: demo_app(),
            outcome: Mutex::new(outcome),
            session: Mutex::new(None),
            account: user(),
            password: "hunter2".to_string(),
            records: Mutex::new(HashMap::new()),
            load_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
            last_patch: Mutex::new(None),
            load_delay: None,
            sign_out_fails: false,
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn with_records(self, entity_id: &str, records: Vec<DataRecord>) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), records);
        self
    }
}

#[async_trait]
impl BackendProvider for ScriptedProvider {
    async fn load_app(&self) -> Result<App, AppLoadError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        match *self.outcome.lock().unwrap() {
            LoadOutcome::Ready => Ok(self.app.clone()),
            LoadOutcome::SignInRequired => Err(AppLoadError::sign_in_required(
                "user is not authenticated",
                Some(self.app.clone()),
            )),
            LoadOutcome::Fail => Err(ProviderError::Backend("config fetch failed".to_string()).into()),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<User> {
        if email != self.account.email || password != self.password {
            return Err(ProviderError::Auth("invalid credentials".to_string()));
        }
        *self.session.lock().unwrap() = Some(self.account.clone());
        *self.outcome.lock().unwrap() = LoadOutcome::Ready;
        Ok(self.account.clone())
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        if self.sign_out_fails {
            return Err(ProviderError::Backend("session close failed".to_string()));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.session.lock().unwrap().clone()
    }

    async fn jwt_token(&self) -> Option<String> {
        self.session
            .lock()
            .unwrap()
            .as_ref()
            .map(|_| "tok".to_string())
    }

    fn can(&self, _action: AuthorizerAction, _context: &AuthorizerContext) -> (bool, Option<String>) {
        (true, None)
    }

    async fn single_record(&self, entity: &Entity, id: &str) -> ProviderResult<DataRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&entity.id)
            .and_then(|block| block.iter().find(|record| record.id == id))
            .cloned()
            .ok_or_else(|| ProviderError::Backend(format!("record {id} not found")))
    }

    async fn records(&self, entity: &Entity) -> ProviderResult<Vec<DataRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&entity.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_record(&self, entity: &Entity, record: &DataRecord) -> ProviderResult<DataRecord> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_patch.lock().unwrap() = Some(record.clone());
        let mut store = self.records.lock().unwrap();
        let block = store.entry(entity.id.clone()).or_default();
        match block.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                existing.merge_fields(&record.fields);
                Ok(existing.clone())
            }
            None => Err(ProviderError::Backend(format!(
                "record {} not found",
                record.id
            ))),
        }
    }

    async fn create_record(
        &self,
        entity: &Entity,
        record: &DataRecord,
    ) -> ProviderResult<DataRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = record.clone();
        created.id = format!("{id}");
        self.records
            .lock()
            .unwrap()
            .entry(entity.id.clone())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn delete_record(&self, entity: &Entity, record: &DataRecord) -> ProviderResult<bool> {
        let mut store = self.records.lock().unwrap();
        let Some(block) = store.get_mut(&entity.id) else {
            return Ok(false);
        };
        let before = block.len();
        block.retain(|existing| existing.id != record.id);
        Ok(block.len() < before)
    }

    async fn upload_file(
        &self,
        _file: FilePayload,
        file_key: &str,
        _control: UploadControl,
    ) -> ProviderResult<String> {
        Ok(file_key.to_string())
    }
}
