//! Mock backend for testing.
//!
//! Implements every backend port in memory so handlers can be tested
//! without a running service.
//!
//! # Features
//!
//! - Pre-configured replies per endpoint
//! - Error injection per endpoint
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let backend = MockBackend::new()
//!     .with_chat_reply("Use your inhaler before going out.")
//!     .failing(Endpoint::SosAlert, BackendError::network("reset"));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::air_quality::{Advisory, AdvisoryReport, AqiReading};
use crate::domain::chat::ChatQuery;
use crate::domain::foundation::{GeoPoint, UserId};
use crate::domain::profile::ProfileRecord;
use crate::domain::sos::SosAlert;
use crate::ports::{AdvisoryClient, BackendError, ChatClient, ProfileSync, SosClient};

/// Backend endpoints, used to target error injection and call tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetAdvisory,
    AskDoctor,
    SosAlert,
    UsersProfile,
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub endpoint: Endpoint,
    pub user_id: UserId,
}

#[derive(Debug)]
struct MockState {
    advisory: AdvisoryReport,
    chat_reply: String,
    alert: SosAlert,
    errors: HashMap<Endpoint, BackendError>,
    calls: Vec<MockCall>,
    pushed: Vec<ProfileRecord>,
}

/// In-memory stand-in for the HTTP backend.
#[derive(Debug, Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        let state = MockState {
            advisory: AdvisoryReport {
                aqi: AqiReading {
                    aqi_index: 2,
                    pm2_5: 32.5,
                    indian_aqi: 54,
                },
                advisory: Advisory {
                    advisory_text: "Air quality is acceptable. Carry your inhaler.".to_string(),
                    activities: json!({ "outdoor_running": "Limit to 30 minutes" }),
                },
            },
            chat_reply: "Stay hydrated and avoid dusty areas.".to_string(),
            alert: SosAlert {
                status: "SOS Activated".to_string(),
                voice_text: "Sit upright. Take slow, deep breaths.".to_string(),
                guardian_info: Some("+911234567890".to_string()),
                location_sent: None,
                msg_status: Some("Sent".to_string()),
                call_status: None,
            },
            errors: HashMap::new(),
            calls: Vec::new(),
            pushed: Vec::new(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_advisory(self, report: AdvisoryReport) -> Self {
        self.state.lock().unwrap().advisory = report;
        self
    }

    pub fn with_chat_reply(self, reply: impl Into<String>) -> Self {
        self.state.lock().unwrap().chat_reply = reply.into();
        self
    }

    pub fn with_alert(self, alert: SosAlert) -> Self {
        self.state.lock().unwrap().alert = alert;
        self
    }

    /// Makes every call to `endpoint` fail with `error`.
    pub fn failing(self, endpoint: Endpoint, error: BackendError) -> Self {
        self.set_error(endpoint, Some(error));
        self
    }

    pub fn set_error(&self, endpoint: Endpoint, error: Option<BackendError>) {
        let mut state = self.state.lock().unwrap();
        match error {
            Some(error) => state.errors.insert(endpoint, error),
            None => state.errors.remove(&endpoint),
        };
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    /// Profiles received on `/users/profile`, in order.
    pub fn pushed_profiles(&self) -> Vec<ProfileRecord> {
        self.state.lock().unwrap().pushed.clone()
    }

    fn record(&self, endpoint: Endpoint, user_id: &UserId) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            endpoint,
            user_id: user_id.clone(),
        });
        match state.errors.get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdvisoryClient for MockBackend {
    async fn get_advisory(
        &self,
        user_id: &UserId,
        _position: GeoPoint,
    ) -> Result<AdvisoryReport, BackendError> {
        self.record(Endpoint::GetAdvisory, user_id)?;
        Ok(self.state.lock().unwrap().advisory.clone())
    }
}

#[async_trait]
impl ChatClient for MockBackend {
    async fn ask_doctor(
        &self,
        user_id: &UserId,
        _query: &ChatQuery,
    ) -> Result<String, BackendError> {
        self.record(Endpoint::AskDoctor, user_id)?;
        Ok(self.state.lock().unwrap().chat_reply.clone())
    }
}

#[async_trait]
impl SosClient for MockBackend {
    async fn send_alert(
        &self,
        user_id: &UserId,
        _position: GeoPoint,
    ) -> Result<SosAlert, BackendError> {
        self.record(Endpoint::SosAlert, user_id)?;
        Ok(self.state.lock().unwrap().alert.clone())
    }
}

#[async_trait]
impl ProfileSync for MockBackend {
    async fn push_profile(
        &self,
        user_id: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), BackendError> {
        self.record(Endpoint::UsersProfile, user_id)?;
        self.state.lock().unwrap().pushed.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn position() -> GeoPoint {
        GeoPoint::new(28.61, 77.21).unwrap()
    }

    #[tokio::test]
    async fn injected_error_applies_to_one_endpoint() {
        let backend = MockBackend::new().failing(Endpoint::SosAlert, BackendError::network("reset"));

        assert!(backend.send_alert(&uid(), position()).await.is_err());
        assert!(backend.get_advisory(&uid(), position()).await.is_ok());
        assert_eq!(backend.call_count(Endpoint::SosAlert), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let backend = MockBackend::new();
        let clone = backend.clone();
        clone
            .push_profile(&uid(), &ProfileRecord::default())
            .await
            .unwrap();
        assert_eq!(backend.pushed_profiles().len(), 1);
    }
}
