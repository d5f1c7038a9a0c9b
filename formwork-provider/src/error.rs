//! Error types for the provider layer.

use formwork_schema::{App, AppLifecycle};
use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur in provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network/transport error.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error payload or status.
    #[error("backend error: {0}")]
    Backend(String),

    /// Authentication error (bad credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record payload failed value-level validation.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] formwork_values::ValueError),

    /// The upload transport reported non-success.
    #[error("upload failed: {0}")]
    Upload(String),

    /// The caller cancelled an in-flight upload.
    #[error("operation cancelled")]
    Cancelled,
}

/// Failure to load the app, carrying the lifecycle state to route to.
///
/// Expected auth failures are not transport errors: the backend still
/// serves the (public part of the) app schema, so the mapped [`App`] rides
/// along when available and `state` is
/// [`AppLifecycle::SignInRequired`]. Unexpected failures carry
/// [`AppLifecycle::Error`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppLoadError {
    pub message: String,
    pub state: AppLifecycle,
    pub app: Option<App>,
}

impl AppLoadError {
    /// The user must sign in before the app is usable.
    pub fn sign_in_required(message: impl Into<String>, app: Option<App>) -> Self {
        Self {
            message: message.into(),
            state: AppLifecycle::SignInRequired,
            app,
        }
    }
}

impl From<ProviderError> for AppLoadError {
    fn from(error: ProviderError) -> Self {
        Self {
            message: error.to_string(),
            state: AppLifecycle::Error,
            app: None,
        }
    }
}
