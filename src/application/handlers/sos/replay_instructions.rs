//! ReplayInstructions - Command handler for repeating SOS instructions.

use std::sync::Arc;

use crate::application::{HandlerError, SosChannel};
use crate::ports::SpeechService;

/// Handler for replaying the stored voice instructions.
pub struct ReplayInstructionsHandler {
    channel: Arc<SosChannel>,
    speech: Arc<dyn SpeechService>,
}

impl ReplayInstructionsHandler {
    pub fn new(channel: Arc<SosChannel>, speech: Arc<dyn SpeechService>) -> Self {
        Self { channel, speech }
    }

    /// Speaks the instructions again and returns them.
    pub fn handle(&self) -> Result<String, HandlerError> {
        let session = self
            .channel
            .current()?
            .filter(|session| session.active)
            .ok_or(HandlerError::NoActiveSos)?;

        self.speech.cancel();
        self.speech.speak(&session.data.voice_text)?;
        Ok(session.data.voice_text)
    }
}
