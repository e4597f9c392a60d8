//! EndSos - Command handler for ending an emergency.

use std::sync::Arc;

use crate::application::{HandlerError, SosChannel};
use crate::ports::SpeechService;

/// Handler for ending SOS.
///
/// Stops any spoken instructions and removes the session. Ending when no
/// session is active succeeds.
pub struct EndSosHandler {
    channel: Arc<SosChannel>,
    speech: Arc<dyn SpeechService>,
}

impl EndSosHandler {
    pub fn new(channel: Arc<SosChannel>, speech: Arc<dyn SpeechService>) -> Self {
        Self { channel, speech }
    }

    pub fn handle(&self) -> Result<(), HandlerError> {
        self.speech.cancel();
        self.channel.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::device::LoggingSpeechService;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::sos::SosPayload;

    #[test]
    fn clears_session_and_stops_speech() {
        let channel = Arc::new(SosChannel::new(Arc::new(InMemoryKeyValueStore::new())));
        let speech = Arc::new(LoggingSpeechService::new());
        channel
            .activate(SosPayload {
                status: "SOS Activated".into(),
                voice_text: "Stay calm.".into(),
            })
            .unwrap();
        speech.speak("Stay calm.").unwrap();
        let handler = EndSosHandler::new(channel.clone(), speech.clone());

        handler.handle().unwrap();
        handler.handle().unwrap();

        assert_eq!(channel.current(), Ok(None));
        assert!(speech.speaking().is_none());
    }
}
