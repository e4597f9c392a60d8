//! HTTP backend client.
//!
//! One `reqwest` client implements every backend port. Each request
//! carries `Authorization: Bearer <id token>` from the identity provider;
//! the raw `uid` in the body is informational and never trusted alone.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::air_quality::AdvisoryReport;
use crate::domain::chat::ChatQuery;
use crate::domain::foundation::{GeoPoint, UserId};
use crate::domain::profile::ProfileRecord;
use crate::domain::sos::SosAlert;
use crate::ports::{
    AdvisoryClient, BackendError, ChatClient, IdentityProvider, ProfileSync, SosClient,
};

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct PositionRequest<'a> {
    uid: &'a str,
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    uid: &'a str,
    query: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

/// Backend client over HTTPS.
pub struct HttpBackendClient {
    config: HttpBackendConfig,
    client: Client,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpBackendClient {
    pub fn new(
        config: HttpBackendConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            identity,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn bearer(&self) -> Result<Secret<String>, BackendError> {
        self.identity.id_token().await.map_err(|e| {
            tracing::debug!("No credential for backend call: {}", e);
            BackendError::NotAuthenticated
        })
    }

    /// Posts `body` to `path` and decodes the JSON reply.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer().await?;

        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {}", token.expose_secret()))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = handle_response_status(path, response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            BackendError::network(format!("Connection failed: {}", e))
        } else {
            BackendError::network(e.to_string())
        }
    }
}

async fn handle_response_status(path: &str, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(path, status = status.as_u16(), "Backend request failed");

    match status.as_u16() {
        401 | 403 => Err(BackendError::NotAuthenticated),
        code => Err(BackendError::Status { status: code, body }),
    }
}

#[async_trait]
impl AdvisoryClient for HttpBackendClient {
    async fn get_advisory(
        &self,
        user_id: &UserId,
        position: GeoPoint,
    ) -> Result<AdvisoryReport, BackendError> {
        let body = PositionRequest {
            uid: user_id.as_str(),
            lat: position.lat(),
            lon: position.lon(),
        };
        self.post("/get-advisory", &body).await
    }
}

#[async_trait]
impl ChatClient for HttpBackendClient {
    async fn ask_doctor(
        &self,
        user_id: &UserId,
        query: &ChatQuery,
    ) -> Result<String, BackendError> {
        let body = ChatRequest {
            uid: user_id.as_str(),
            query: query.as_str(),
        };
        let reply: ChatResponse = self.post("/ask-doctor", &body).await?;
        Ok(reply.response)
    }
}

#[async_trait]
impl SosClient for HttpBackendClient {
    async fn send_alert(
        &self,
        user_id: &UserId,
        position: GeoPoint,
    ) -> Result<SosAlert, BackendError> {
        let body = PositionRequest {
            uid: user_id.as_str(),
            lat: position.lat(),
            lon: position.lon(),
        };
        self.post("/sos-alert", &body).await
    }
}

#[async_trait]
impl ProfileSync for HttpBackendClient {
    async fn push_profile(
        &self,
        user_id: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), BackendError> {
        let mut body = serde_json::to_value(record)
            .map_err(|e| BackendError::Decode(format!("Failed to encode profile: {}", e)))?;
        if let Value::Object(fields) = &mut body {
            fields.insert("uid".to_string(), Value::String(user_id.to_string()));
        }
        let _ack: Value = self.post("/users/profile", &body).await?;
        Ok(())
    }
}
