//! REST backend provider.
//!
//! Talks to a Formwork-style API: `{endpoint}/app-config/{app_id}` for the
//! schema and `{endpoint}/lambda-server/{app_id}/{entity_id}[/{record_id}]`
//! for records, bearer-token authorized, JSON bodies. File upload is a
//! two-step signed-URL flow.

use crate::{
    config, AppLoadError, AuthService, Authorizer, AuthorizerAction, AuthorizerContext,
    BackendProvider, FilePayload, ProviderError, ProviderResult, UploadControl,
};
use async_trait::async_trait;
use formwork_schema::wire::{map_app, AppConfigPayload};
use formwork_schema::{App, Entity, User};
use formwork_values::DataRecord;
use reqwest::Client;
use serde::Deserialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the REST provider.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base API endpoint, resolved via [`config::api_endpoint`].
    pub api_endpoint: String,
    /// Public identifier of the app to load.
    pub app_id: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Page size for list requests.
    pub list_limit: u32,
}

impl RestConfig {
    /// Config for an app id, with the endpoint taken from the environment
    /// or the default.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self::with_endpoint(app_id, config::api_endpoint(None))
    }

    /// Config with an explicit endpoint.
    pub fn with_endpoint(app_id: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            app_id: app_id.into(),
            timeout_secs: 60,
            list_limit: 100,
        }
    }
}

/// Metadata the upload flow echoes back to the backend.
#[derive(Debug, Clone, Default)]
struct AppMetadata {
    app_id: String,
    organization_id: String,
}

/// REST implementation of [`BackendProvider`].
pub struct RestBackendProvider {
    config: RestConfig,
    client: Client,
    auth: Arc<dyn AuthService>,
    /// Access-control snapshot, written by `load_app`, read by `can`.
    authorizer: RwLock<Authorizer>,
    metadata: RwLock<AppMetadata>,
}

impl RestBackendProvider {
    /// Creates a new REST provider over the given auth service.
    pub fn new(config: RestConfig, auth: Arc<dyn AuthService>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");
        let metadata = AppMetadata {
            app_id: config.app_id.clone(),
            organization_id: String::new(),
        };

        Self {
            config,
            client,
            auth,
            authorizer: RwLock::new(Authorizer::default()),
            metadata: RwLock::new(metadata),
        }
    }

    fn record_url(&self, entity: &Entity, record_id: Option<&str>) -> String {
        let base = format!(
            "{}/lambda-server/{}/{}",
            self.config.api_endpoint, self.config.app_id, entity.id
        );
        match record_id {
            Some(id) => format!("{base}/{id}"),
            None => base,
        }
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.jwt_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> ProviderResult<serde_json::Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("{what} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Backend(format!(
                "{what} failed with {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to parse {what} response: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedUrl")]
    signed_url: String,
    #[serde(rename = "fileKey")]
    file_key: String,
}

#[async_trait]
impl BackendProvider for RestBackendProvider {
    async fn load_app(&self) -> Result<App, AppLoadError> {
        debug!(app_id = %self.config.app_id, "Loading app config");

        let url = format!(
            "{}/app-config/{}",
            self.config.api_endpoint, self.config.app_id
        );
        let request = self.authorized(self.client.get(&url)).await;
        let body = self.send_json(request, "app config load").await?;

        let payload: AppConfigPayload = serde_json::from_value(body)
            .map_err(|e| ProviderError::Backend(format!("malformed app config: {e}")))?;
        let app = map_app(&payload);

        if !payload.user.authenticated {
            debug!("App config loaded without a session");
            return Err(AppLoadError::sign_in_required("Not authenticated", Some(app)));
        }

        *self.authorizer.write().expect("authorizer lock poisoned") =
            Authorizer::new(payload.app.roles.clone(), payload.user.grants.clone());
        self.metadata.write().expect("metadata lock poisoned").organization_id =
            payload.app.organization_id.to_string();

        info!(app = %app.id, entities = app.entities.len(), "App config loaded");
        Ok(app)
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<User> {
        self.auth.sign_in(email, password).await
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        self.auth.sign_out().await
    }

    async fn current_user(&self) -> Option<User> {
        self.auth.current_user().await
    }

    async fn jwt_token(&self) -> Option<String> {
        self.auth.jwt_token().await
    }

    fn can(&self, action: AuthorizerAction, context: &AuthorizerContext) -> (bool, Option<String>) {
        self.authorizer
            .read()
            .expect("authorizer lock poisoned")
            .can(action, context)
    }

    async fn single_record(&self, entity: &Entity, id: &str) -> ProviderResult<DataRecord> {
        let request = self
            .authorized(self.client.get(self.record_url(entity, Some(id))))
            .await;
        let body = self.send_json(request, "record fetch").await?;
        let result = body
            .get("result")
            .ok_or_else(|| ProviderError::Backend("record response has no result".to_string()))?;
        Ok(DataRecord::from_json(result)?)
    }

    async fn records(&self, entity: &Entity) -> ProviderResult<Vec<DataRecord>> {
        let request = self
            .authorized(
                self.client
                    .get(self.record_url(entity, None))
                    .query(&[("limit", self.config.list_limit)]),
            )
            .await;
        let body = self.send_json(request, "record list").await?;
        let rows = body
            .pointer("/result/rows")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProviderError::Backend("record list has no rows".to_string()))?;

        rows.iter()
            .map(|row| DataRecord::from_json(row).map_err(ProviderError::from))
            .collect()
    }

    async fn save_record(&self, entity: &Entity, record: &DataRecord) -> ProviderResult<DataRecord> {
        debug!(entity = %entity.id, record = %record.id, "Saving record");

        let request = self
            .authorized(
                self.client
                    .patch(self.record_url(entity, Some(&record.id)))
                    .json(&record.body_json()),
            )
            .await;
        let body = self.send_json(request, "record save").await?;

        if let Some(message) = body.get("longMessage").and_then(|v| v.as_str()) {
            return Err(ProviderError::Backend(message.to_string()));
        }
        let saved = body
            .get("record")
            .ok_or_else(|| ProviderError::Backend("save response has no record".to_string()))?;
        Ok(DataRecord::from_json(saved)?)
    }

    async fn create_record(
        &self,
        entity: &Entity,
        record: &DataRecord,
    ) -> ProviderResult<DataRecord> {
        debug!(entity = %entity.id, "Creating record");

        let request = self
            .authorized(
                self.client
                    .post(self.record_url(entity, None))
                    .json(&record.body_json()),
            )
            .await;
        let body = self.send_json(request, "record create").await?;
        let created = body
            .get("record")
            .ok_or_else(|| ProviderError::Backend("create response has no record".to_string()))?;
        Ok(DataRecord::from_json(created)?)
    }

    async fn delete_record(&self, entity: &Entity, record: &DataRecord) -> ProviderResult<bool> {
        debug!(entity = %entity.id, record = %record.id, "Deleting record");

        let request = self
            .authorized(self.client.delete(self.record_url(entity, Some(&record.id))))
            .await;
        let body = self.send_json(request, "record delete").await?;
        Ok(body.get("success").and_then(|v| v.as_bool()).unwrap_or(false))
    }

    async fn upload_file(
        &self,
        file: FilePayload,
        file_key: &str,
        control: UploadControl,
    ) -> ProviderResult<String> {
        debug!(file_key, bytes = file.bytes.len(), "Requesting signed upload URL");

        let (app_id, organization_id) = {
            let metadata = self.metadata.read().expect("metadata lock poisoned");
            (metadata.app_id.clone(), metadata.organization_id.clone())
        };
        let request = self
            .authorized(
                self.client
                    .post(format!(
                        "{}/lambda-server/{}/do",
                        self.config.api_endpoint, self.config.app_id
                    ))
                    .json(&serde_json::json!({
                        "op": "_getSignedUrl",
                        "app_id": app_id,
                        "organization_id": organization_id,
                        "contentType": file.content_type,
                        "fileKey": file_key,
                    })),
            )
            .await;
        let body = self.send_json(request, "signed URL request").await?;
        let signed: SignedUrlResponse = serde_json::from_value(body)?;

        if let Some(progress) = &control.progress {
            progress(0.0);
        }

        let put = self
            .client
            .put(&signed.signed_url)
            .header("Content-Type", file.content_type)
            .body(file.bytes)
            .send();

        let response = match control.cancel {
            Some(mut cancel) => tokio::select! {
                _ = &mut cancel => return Err(ProviderError::Cancelled),
                response = put => response,
            },
            None => put.await,
        }
        .map_err(|e| ProviderError::Upload(format!("upload transport failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError::Upload(format!(
                "upload failed with {}",
                response.status()
            )));
        }
        if let Some(progress) = &control.progress {
            progress(1.0);
        }

        info!(file_key = %signed.file_key, "Upload complete");
        Ok(signed.file_key)
    }
}
