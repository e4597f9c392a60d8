//! AskDoctor - Command handler for the chat assistant.

use std::sync::Arc;

use crate::application::{HandlerError, SessionStore};
use crate::domain::chat::{ChatAnswer, ChatExchange, ChatQuery, ChatTranscript};
use crate::domain::foundation::AuthError;
use crate::ports::ChatClient;

/// Handler for chat questions.
///
/// Invalid questions are rejected before anything is recorded. A backend
/// failure is recorded in the transcript as the connection placeholder,
/// with the error attached.
pub struct AskDoctorHandler {
    session: Arc<SessionStore>,
    client: Arc<dyn ChatClient>,
}

impl AskDoctorHandler {
    pub fn new(session: Arc<SessionStore>, client: Arc<dyn ChatClient>) -> Self {
        Self { session, client }
    }

    pub async fn handle(
        &self,
        transcript: &mut ChatTranscript,
        text: &str,
    ) -> Result<ChatExchange, HandlerError> {
        let query = ChatQuery::new(text)?;
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotSignedIn)?;

        let answer = match self.client.ask_doctor(&identity.id, &query).await {
            Ok(reply) => ChatAnswer::Answered(reply),
            Err(e) => {
                tracing::warn!(user_id = %identity.id, "Chat request failed: {}", e);
                ChatAnswer::Unavailable {
                    error: e.to_string(),
                }
            }
        };

        Ok(transcript.record(query, answer).clone())
    }
}
