//! Text-to-speech port.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("Speech synthesis is not supported on this device")]
    Unsupported,

    #[error("Speech synthesis failed: {0}")]
    Failed(String),
}

/// Speaks text aloud. Speaking again replaces any utterance in progress.
pub trait SpeechService: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), SpeechError>;

    /// Stops any utterance in progress. Harmless when idle.
    fn cancel(&self);
}
