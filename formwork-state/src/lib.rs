//! Application state container and lifecycle orchestration for Formwork.
//!
//! The split follows one rule: the state container is a pure reducer over
//! a closed action set and never performs I/O; the orchestrator does all
//! the I/O and projects results into the container as actions.
//!
//! - [`AppState`] / [`Action`] / [`reduce`] — the reducer core
//! - [`AppStore`] — an explicitly constructed handle over the state,
//!   applying actions in dispatch order
//! - [`AppOrchestrator`] — drives the backend provider through the
//!   lifecycle graph (load, sign-in/out, refresh), single-flighted by a
//!   generation counter
//! - [`EntityFormModel`] — headless form orchestration: load a record,
//!   derive form values and field props, submit minimal diffs

mod form;
mod orchestrator;
mod state;
mod store;

pub use form::{EntityFormModel, FormField};
pub use orchestrator::AppOrchestrator;
pub use state::{reduce, Action, AppState, AuthState};
pub use store::AppStore;

/// Result type alias using the crate's error type.
pub type StateResult<T> = std::result::Result<T, StateError>;

/// Errors surfaced by orchestration (never by the reducer, which is total).
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// An operation needed the app schema before it was loaded.
    #[error("app is not loaded")]
    AppNotLoaded,

    /// The app schema has no such entity.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// A backend provider call failed.
    #[error(transparent)]
    Provider(#[from] formwork_provider::ProviderError),

    /// Building form props failed (schema error).
    #[error(transparent)]
    Props(#[from] formwork_values::ValueError),
}
