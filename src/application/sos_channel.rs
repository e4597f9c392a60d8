//! Durable emergency-mode flag.
//!
//! The record is scoped to the device, not to an identity: an emergency
//! started while signed in must still lock navigation after a sign-out or
//! in a freshly opened tab.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::sos::{SosPayload, SosSession, SosStatus, SOS_STORAGE_KEY};
use crate::ports::{KeyValueStore, StorageError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SosError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize SOS session: {0}")]
    Serialization(String),

    #[error("Stored SOS session is malformed: {0}")]
    Malformed(String),
}

/// Reads and writes the persisted `SosSession`.
pub struct SosChannel {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SosChannel {
    /// Uses the standard storage key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, SOS_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Starts an emergency session, replacing any previous one.
    pub fn activate(&self, data: SosPayload) -> Result<SosSession, SosError> {
        let session = SosSession::activate(data);
        let json =
            serde_json::to_string(&session).map_err(|e| SosError::Serialization(e.to_string()))?;
        self.store.set(&self.key, &json)?;
        tracing::warn!(timestamp = session.timestamp.as_millis(), "SOS session activated");
        Ok(session)
    }

    /// The persisted session, if any.
    ///
    /// # Errors
    ///
    /// - `SosError::Storage` when the store cannot be read
    /// - `SosError::Malformed` when the record under our key does not parse
    pub fn current(&self) -> Result<Option<SosSession>, SosError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SosError::Malformed(e.to_string()))
    }

    /// Returns true while an active session is stored.
    pub fn is_active(&self) -> Result<bool, SosError> {
        Ok(self.current()?.map_or(false, |session| session.active))
    }

    /// Emergency status for navigation.
    ///
    /// A record that cannot be read counts as `Unreadable`, which keeps
    /// navigation locked. Clearing the session releases it.
    pub fn status(&self) -> SosStatus {
        match self.is_active() {
            Ok(true) => SosStatus::Active,
            Ok(false) => SosStatus::Inactive,
            Err(e) => {
                tracing::error!("SOS session unreadable, keeping navigation locked: {}", e);
                SosStatus::Unreadable
            }
        }
    }

    /// Removes the session entirely. Clearing twice is not an error.
    pub fn clear(&self) -> Result<(), SosError> {
        self.store.remove(&self.key)?;
        tracing::info!("SOS session cleared");
        Ok(())
    }
}
