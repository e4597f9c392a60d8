//! ActivateSos - Command handler for raising an emergency.

use std::sync::Arc;

use crate::application::{HandlerError, SessionStore, SosChannel};
use crate::domain::foundation::AuthError;
use crate::domain::sos::{SosAlert, SosSession};
use crate::ports::{LocationService, SosClient, SpeechService};

/// Result of a successful activation.
#[derive(Debug, Clone)]
pub struct ActivateSosResult {
    /// The full backend reply, delivery details included.
    pub alert: SosAlert,
    /// What was persisted.
    pub session: SosSession,
}

/// Handler for SOS activation.
///
/// All-or-nothing: the emergency flag is written only after a position
/// was acquired and the alert went out. Any earlier failure leaves the
/// channel untouched.
pub struct ActivateSosHandler {
    session: Arc<SessionStore>,
    location: Arc<dyn LocationService>,
    client: Arc<dyn SosClient>,
    channel: Arc<SosChannel>,
    speech: Arc<dyn SpeechService>,
}

impl ActivateSosHandler {
    pub fn new(
        session: Arc<SessionStore>,
        location: Arc<dyn LocationService>,
        client: Arc<dyn SosClient>,
        channel: Arc<SosChannel>,
        speech: Arc<dyn SpeechService>,
    ) -> Self {
        Self {
            session,
            location,
            client,
            channel,
            speech,
        }
    }

    pub async fn handle(&self) -> Result<ActivateSosResult, HandlerError> {
        // 1. Who is asking
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotSignedIn)?;

        // 2. Where they are
        let position = self.location.current_position().await?;

        // 3. Alert the guardian
        let alert = self.client.send_alert(&identity.id, position).await?;

        // 4. Only now lock navigation
        let session = self.channel.activate(alert.payload())?;
        tracing::warn!(user_id = %identity.id, "SOS activated");

        // 5. Speak the instructions; the emergency stands even if this fails
        if let Err(e) = self.speech.speak(&alert.voice_text) {
            tracing::warn!("Could not speak SOS instructions: {}", e);
        }

        Ok(ActivateSosResult { alert, session })
    }
}
