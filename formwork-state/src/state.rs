//! The reducer core: [`AppState`], the closed [`Action`] set, and [`reduce`].
//!
//! [`reduce`] is total. Every action maps to a new state; there is no
//! action, state, or payload combination that fails. Illegal lifecycle
//! transitions and removals of absent records leave the state unchanged.

use formwork_schema::{App, AppLifecycle, User};
use formwork_values::DataRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Authentication slice of the app state.
///
/// Invariant: `user` is `Some` only when `is_authenticated` is true.
/// [`reduce`] re-establishes this on every `SetAuth`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub is_initialized: bool,
    pub user: Option<User>,
    pub busy_initializing: bool,
    pub error_initializing: Option<String>,
}

impl AuthState {
    /// An initialized, signed-in auth slice for `user`.
    pub fn authenticated(user: User) -> Self {
        Self {
            is_authenticated: true,
            is_initialized: true,
            user: Some(user),
            busy_initializing: false,
            error_initializing: None,
        }
    }

    /// An initialized auth slice without a session.
    pub fn signed_out() -> Self {
        Self {
            is_initialized: true,
            ..Self::default()
        }
    }
}

/// The whole application state. Cheap to clone for snapshots; the data
/// blocks dominate and stay small in practice (list fetches are capped
/// by the provider).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// The loaded schema, absent until the first successful (or partially
    /// successful) load.
    pub app: Option<App>,
    /// Current lifecycle state. Defaults to [`AppLifecycle::Idle`].
    pub current_state: AppLifecycle,
    /// Message from the last failed load, cleared on the next one.
    pub error: Option<String>,
    /// Auth slice, absent until the first session probe resolves.
    pub auth: Option<AuthState>,
    /// Fetched records, keyed by entity id.
    pub data_block: HashMap<String, Vec<DataRecord>>,
}

/// The closed set of state mutations. Nothing else touches [`AppState`].
#[derive(Debug, Clone)]
pub enum Action {
    SetApp(App),
    SetAppCurrentState(AppLifecycle),
    SetAuth(AuthState),
    SetError(Option<String>),
    SetDataBlock {
        entity_id: String,
        records: Vec<DataRecord>,
    },
    /// Upsert: merges fields into an existing record with the same id, or
    /// appends when none exists.
    SetDataBlockRecord {
        entity_id: String,
        record: DataRecord,
    },
    /// No-op when the block or record does not exist.
    RemoveDataBlockRecord {
        entity_id: String,
        record_id: String,
    },
}

/// Applies `action` to `state` and returns the next state.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetApp(app) => {
            state.app = Some(app);
        }
        Action::SetAppCurrentState(to) => {
            if state.current_state.can_transition(to) {
                state.current_state = to;
            } else {
                tracing::warn!(
                    from = %state.current_state,
                    to = %to,
                    "ignoring illegal lifecycle transition"
                );
            }
        }
        Action::SetAuth(mut auth) => {
            if !auth.is_authenticated {
                auth.user = None;
            }
            state.auth = Some(auth);
        }
        Action::SetError(error) => {
            state.error = error;
        }
        Action::SetDataBlock { entity_id, records } => {
            // Replaces the block wholesale, but still one entry per id:
            // a list carrying the same id twice folds into one record.
            let mut block = Vec::with_capacity(records.len());
            for record in records {
                upsert(&mut block, record);
            }
            state.data_block.insert(entity_id, block);
        }
        Action::SetDataBlockRecord { entity_id, record } => {
            upsert(state.data_block.entry(entity_id).or_default(), record);
        }
        Action::RemoveDataBlockRecord {
            entity_id,
            record_id,
        } => {
            if let Some(block) = state.data_block.get_mut(&entity_id) {
                block.retain(|record| record.id != record_id);
            }
        }
    }
    state
}

/// Merges `record` into an existing entry with the same id, or appends.
/// Keeps blocks unique by record id.
fn upsert(block: &mut Vec<DataRecord>, record: DataRecord) {
    match block.iter_mut().find(|existing| existing.id == record.id) {
        Some(existing) => existing.merge_fields(&record.fields),
        None => block.push(record),
    }
}
