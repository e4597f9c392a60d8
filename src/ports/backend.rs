//! Backend service ports.
//!
//! The backend computes air quality, advisories, chat answers and sends
//! SOS alerts. Every call carries the caller's identity credential; none
//! is retried automatically.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::air_quality::AdvisoryReport;
use crate::domain::chat::ChatQuery;
use crate::domain::foundation::{GeoPoint, UserId};
use crate::domain::profile::ProfileRecord;
use crate::domain::sos::SosAlert;

/// Errors from backend calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No credential was available to attach.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns true if the visitor may simply resubmit.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Timeout { .. } | BackendError::Network(_) => true,
            BackendError::Status { status, .. } => *status == 429 || *status >= 500,
            BackendError::NotAuthenticated | BackendError::Decode(_) => false,
        }
    }
}

/// `POST /get-advisory`.
#[async_trait]
pub trait AdvisoryClient: Send + Sync {
    async fn get_advisory(
        &self,
        user_id: &UserId,
        position: GeoPoint,
    ) -> Result<AdvisoryReport, BackendError>;
}

/// `POST /ask-doctor`.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn ask_doctor(&self, user_id: &UserId, query: &ChatQuery)
        -> Result<String, BackendError>;
}

/// `POST /sos-alert`.
#[async_trait]
pub trait SosClient: Send + Sync {
    async fn send_alert(&self, user_id: &UserId, position: GeoPoint)
        -> Result<SosAlert, BackendError>;
}

/// `POST /users/profile`.
#[async_trait]
pub trait ProfileSync: Send + Sync {
    async fn push_profile(
        &self,
        user_id: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), BackendError>;
}
