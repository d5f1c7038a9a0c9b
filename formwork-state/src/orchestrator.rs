//! Drives the backend provider through the lifecycle graph and projects
//! every outcome into the store as actions.

use crate::state::{Action, AuthState};
use crate::store::AppStore;
use crate::StateResult;
use formwork_provider::{AuthorizerAction, AuthorizerContext, BackendProvider};
use formwork_schema::{AppLifecycle, User};
use formwork_values::DataRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrates app loading, session changes, and data-block fills.
///
/// [`load_app`](Self::load_app) is single-flighted by the lifecycle gate:
/// a load only starts from a loadable state and immediately moves the
/// store to `Initializing`, so a second trigger while one is in flight
/// no-ops. The generation counter backs the gate against the window
/// between checking the state and dispatching `Initializing` when two
/// triggers race on different threads; a call that lost that race drops
/// its results instead of writing stale state.
pub struct AppOrchestrator {
    store: Arc<AppStore>,
    provider: Arc<dyn BackendProvider>,
    generation: AtomicU64,
}

impl AppOrchestrator {
    pub fn new(store: Arc<AppStore>, provider: Arc<dyn BackendProvider>) -> Self {
        Self {
            store,
            provider,
            generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn BackendProvider> {
        &self.provider
    }

    fn superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Runs the load sequence: probe the session, load the schema, settle
    /// in `Ready`, `SignInRequired`, or `Error`.
    ///
    /// Only starts from `Idle` or `Stale`; any other current state,
    /// including the `Initializing` an in-flight load holds, makes this a
    /// no-op. Repeated triggers (remounts, double refreshes) therefore
    /// cannot restart the sequence.
    pub async fn load_app(&self) -> StateResult<()> {
        if !self.store.current_state().is_loadable() {
            debug!(state = %self.store.current_state(), "load_app skipped, not loadable");
            return Ok(());
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.dispatch(Action::SetError(None));
        self.store
            .dispatch(Action::SetAppCurrentState(AppLifecycle::Initializing));

        let user = self.provider.current_user().await;
        if self.superseded(generation) {
            debug!(generation, "load_app superseded during session probe");
            return Ok(());
        }
        match user {
            Some(user) => self
                .store
                .dispatch(Action::SetAuth(AuthState::authenticated(user))),
            None => self.store.dispatch(Action::SetAuth(AuthState::signed_out())),
        }

        let loaded = self.provider.load_app().await;
        if self.superseded(generation) {
            debug!(generation, "load_app superseded during schema load");
            return Ok(());
        }
        match loaded {
            Ok(app) => {
                info!(app_id = %app.id, "app loaded");
                self.store.dispatch(Action::SetApp(app));
                self.store
                    .dispatch(Action::SetAppCurrentState(AppLifecycle::Ready));
            }
            Err(load_error) => {
                info!(state = %load_error.state, message = %load_error.message, "app load did not reach ready");
                if let Some(app) = load_error.app {
                    self.store.dispatch(Action::SetApp(app));
                }
                if load_error.state == AppLifecycle::Error {
                    self.store
                        .dispatch(Action::SetError(Some(load_error.message)));
                }
                self.store
                    .dispatch(Action::SetAppCurrentState(load_error.state));
            }
        }
        Ok(())
    }

    /// Signs in, records the session, and reloads the app schema so the
    /// access-control snapshot matches the new session.
    pub async fn sign_in(&self, email: &str, password: &str) -> StateResult<User> {
        let user = self.provider.sign_in(email, password).await?;
        self.store
            .dispatch(Action::SetAuth(AuthState::authenticated(user.clone())));
        self.store
            .dispatch(Action::SetAppCurrentState(AppLifecycle::Stale));
        self.load_app().await?;
        Ok(user)
    }

    /// Closes the session and settles in `SignInRequired`.
    pub async fn sign_out(&self) -> StateResult<()> {
        self.store
            .dispatch(Action::SetAppCurrentState(AppLifecycle::Initializing));
        if let Err(error) = self.provider.sign_out().await {
            self.store
                .dispatch(Action::SetError(Some(error.to_string())));
            self.store
                .dispatch(Action::SetAppCurrentState(AppLifecycle::Error));
            return Err(error.into());
        }
        self.store.dispatch(Action::SetAuth(AuthState::signed_out()));
        self.store
            .dispatch(Action::SetAppCurrentState(AppLifecycle::SignInRequired));
        Ok(())
    }

    /// Marks the loaded app stale and reloads it.
    pub async fn refresh(&self) -> StateResult<()> {
        self.store
            .dispatch(Action::SetAppCurrentState(AppLifecycle::Stale));
        self.load_app().await
    }

    /// External reset out of the terminal `Error` state.
    pub fn reset(&self) {
        self.store
            .dispatch(Action::SetAppCurrentState(AppLifecycle::Idle));
        self.store.dispatch(Action::SetError(None));
    }

    /// Authorization check with the signed-in user injected into the
    /// context.
    pub fn can(
        &self,
        action: AuthorizerAction,
        context: &AuthorizerContext,
    ) -> (bool, Option<String>) {
        let mut context = context.clone();
        if context.user.is_none() {
            context.user = self.store.auth().and_then(|auth| auth.user);
        }
        self.provider.can(action, &context)
    }

    /// Fetches all records for `entity_id` and replaces its data block.
    pub async fn load_block(&self, entity_id: &str) -> StateResult<Vec<DataRecord>> {
        let app = self.store.app().ok_or(crate::StateError::AppNotLoaded)?;
        let entity = app
            .entity(entity_id)
            .ok_or_else(|| crate::StateError::UnknownEntity(entity_id.to_string()))?;
        let records = self.provider.records(entity).await?;
        self.store.dispatch(Action::SetDataBlock {
            entity_id: entity_id.to_string(),
            records: records.clone(),
        });
        Ok(records)
    }

    /// Deletes `record_id` from the backend and, on success, from the
    /// entity's data block.
    pub async fn delete_record(&self, entity_id: &str, record_id: &str) -> StateResult<bool> {
        let app = self.store.app().ok_or(crate::StateError::AppNotLoaded)?;
        let entity = app
            .entity(entity_id)
            .ok_or_else(|| crate::StateError::UnknownEntity(entity_id.to_string()))?;
        let deleted = self
            .provider
            .delete_record(entity, &DataRecord::new(record_id))
            .await?;
        if deleted {
            self.store.dispatch(Action::RemoveDataBlockRecord {
                entity_id: entity_id.to_string(),
                record_id: record_id.to_string(),
            });
        }
        Ok(deleted)
    }
}
