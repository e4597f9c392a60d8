//! Backend reply to an SOS alert.

use serde::{Deserialize, Serialize};

use super::SosPayload;

/// Full `/sos-alert` response.
///
/// Only `status` and `voice_text` are persisted; the delivery details are
/// shown once and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosAlert {
    pub status: String,
    pub voice_text: String,
    #[serde(default)]
    pub guardian_info: Option<String>,
    #[serde(default)]
    pub location_sent: Option<String>,
    #[serde(default)]
    pub msg_status: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
}

impl SosAlert {
    /// The part of the alert that survives reloads.
    pub fn payload(&self) -> SosPayload {
        SosPayload {
            status: self.status.clone(),
            voice_text: self.voice_text.clone(),
        }
    }
}
