//! The abstract backend provider contract.

use crate::{AppLoadError, AuthorizerAction, AuthorizerContext, ProviderResult};
use async_trait::async_trait;
use formwork_schema::{App, Entity, User};
use formwork_values::DataRecord;
use tokio::sync::oneshot;

/// Upload progress callback, called with a fraction in `0.0..=1.0`.
pub type ProgressFn = Box<dyn Fn(f32) + Send + Sync>;

/// Cooperative controls for a file upload. Both are optional; dropping the
/// cancel sender's receiver-side pair does not cancel.
#[derive(Default)]
pub struct UploadControl {
    pub progress: Option<ProgressFn>,
    pub cancel: Option<oneshot::Receiver<()>>,
}

/// A file to upload: raw bytes plus the content type the signed-URL
/// transport needs.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FilePayload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Capability set any backend integration must implement.
///
/// Errors are returned, not panicked; the session probes
/// ([`current_user`](Self::current_user), [`jwt_token`](Self::jwt_token))
/// treat "no session" as absence rather than an error. Implementations
/// must normalize every record id to a string before returning it.
#[async_trait]
pub trait BackendProvider: Send + Sync {
    /// Loads the app schema and caches the access-control snapshot.
    /// An unauthenticated user yields an [`AppLoadError`] routing to
    /// sign-in, not a transport failure.
    async fn load_app(&self) -> Result<App, AppLoadError>;

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<User>;

    async fn sign_out(&self) -> ProviderResult<()>;

    /// The signed-in user, or `None` without a session.
    async fn current_user(&self) -> Option<User>;

    /// The session token, or `None` without a session.
    async fn jwt_token(&self) -> Option<String>;

    /// Authorization check against the snapshot cached by
    /// [`load_app`](Self::load_app). Pure; no I/O.
    fn can(&self, action: AuthorizerAction, context: &AuthorizerContext) -> (bool, Option<String>);

    async fn single_record(&self, entity: &Entity, id: &str) -> ProviderResult<DataRecord>;

    async fn records(&self, entity: &Entity) -> ProviderResult<Vec<DataRecord>>;

    /// Partial update. The record's fields are the PATCH body; the id
    /// addresses the row and never appears in the body.
    async fn save_record(&self, entity: &Entity, record: &DataRecord) -> ProviderResult<DataRecord>;

    async fn create_record(&self, entity: &Entity, record: &DataRecord)
        -> ProviderResult<DataRecord>;

    async fn delete_record(&self, entity: &Entity, record: &DataRecord) -> ProviderResult<bool>;

    /// Uploads file bytes under `file_key` via the backend's signed-URL
    /// flow and returns the stored key.
    async fn upload_file(
        &self,
        file: FilePayload,
        file_key: &str,
        control: UploadControl,
    ) -> ProviderResult<String>;
}
