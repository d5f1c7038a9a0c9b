//! Backend provider contract for Formwork.
//!
//! Defines the capability set any backend integration must implement —
//! auth, schema loading, record CRUD, file upload, authorization checks —
//! and ships the REST implementation that talks to a Formwork-style API:
//!
//! - [`BackendProvider`] — the abstract contract
//! - [`RestBackendProvider`] — bearer-token REST integration over reqwest
//! - [`AuthService`] / [`StaticAuthService`] — the pluggable auth seam
//! - [`Authorizer`] — grant-based `can()` checks against the
//!   access-control snapshot the app-config payload carries
//! - [`config::api_endpoint`] — endpoint resolution
//!   (argument > environment > default)
//!
//! Every record id leaving this crate is normalized to a string.

mod auth;
mod authorizer;
pub mod config;
mod error;
mod provider;
mod rest;

pub use auth::{AuthService, StaticAuthService};
pub use authorizer::{AuthorizerAction, AuthorizerContext, Authorizer};
pub use error::{AppLoadError, ProviderError, ProviderResult};
pub use provider::{BackendProvider, FilePayload, ProgressFn, UploadControl};
pub use rest::{RestBackendProvider, RestConfig};
