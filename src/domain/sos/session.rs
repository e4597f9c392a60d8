//! Persisted emergency session record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Storage key for the emergency session, scoped per device.
pub const SOS_STORAGE_KEY: &str = "respi_guard_sos";

/// What the backend told us when the alert went out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosPayload {
    pub status: String,
    pub voice_text: String,
}

/// The persisted record: `{ active, timestamp, data: { status, voice_text } }`.
///
/// There is no expiry. The record lives until the visitor ends SOS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosSession {
    pub active: bool,
    pub timestamp: Timestamp,
    pub data: SosPayload,
}

/// What the device's emergency flag says for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SosStatus {
    Inactive,
    Active,
    /// The record exists but cannot be read. Navigation stays locked until
    /// it is readable again or the visitor ends SOS.
    Unreadable,
}

impl SosStatus {
    /// Returns true when navigation must be held on the emergency view.
    pub fn locks_navigation(&self) -> bool {
        !matches!(self, SosStatus::Inactive)
    }
}

impl SosSession {
    /// A new active session started now.
    pub fn activate(data: SosPayload) -> Self {
        Self::activated_at(data, Timestamp::now())
    }

    pub fn activated_at(data: SosPayload, timestamp: Timestamp) -> Self {
        Self {
            active: true,
            timestamp,
            data,
        }
    }
}
