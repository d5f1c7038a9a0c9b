//! Explicitly constructed state handle. Actions apply in dispatch order
//! under the write lock; readers get cloned snapshots, never references
//! into the lock.

use crate::state::{reduce, Action, AppState, AuthState};
use formwork_schema::{App, AppLifecycle};
use formwork_values::DataRecord;
use std::sync::RwLock;

/// Owns the [`AppState`] and serializes all mutations through [`reduce`].
///
/// The store is passed around explicitly (typically as an `Arc`) rather
/// than living in any ambient context. Lock poisoning is not propagated:
/// the reducer cannot panic mid-write, so a poisoned lock still holds a
/// consistent state and is recovered.
#[derive(Debug, Default)]
pub struct AppStore {
    state: RwLock<AppState>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` through the reducer.
    pub fn dispatch(&self, action: Action) {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let state = std::mem::take(&mut *guard);
        *guard = reduce(state, action);
    }

    fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        let guard = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&guard)
    }

    /// A full copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.read(|state| state.clone())
    }

    pub fn current_state(&self) -> AppLifecycle {
        self.read(|state| state.current_state)
    }

    pub fn app(&self) -> Option<App> {
        self.read(|state| state.app.clone())
    }

    pub fn auth(&self) -> Option<AuthState> {
        self.read(|state| state.auth.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    /// The fetched records for `entity_id`, empty when nothing was loaded.
    pub fn data_block(&self, entity_id: &str) -> Vec<DataRecord> {
        self.read(|state| state.data_block.get(entity_id).cloned().unwrap_or_default())
    }

    pub fn data_block_record(&self, entity_id: &str, record_id: &str) -> Option<DataRecord> {
        self.read(|state| {
            state
                .data_block
                .get(entity_id)
                .and_then(|block| block.iter().find(|record| record.id == record_id))
                .cloned()
        })
    }
}
