//! Speech service that logs instead of speaking.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ports::{SpeechError, SpeechService};

#[derive(Debug, Default)]
struct SpeechLog {
    spoken: Vec<String>,
    speaking: Option<String>,
    cancels: usize,
}

/// Writes utterances to the log and keeps a history.
///
/// Used on headless hosts and in tests.
#[derive(Debug, Default)]
pub struct LoggingSpeechService {
    log: Mutex<SpeechLog>,
    unsupported: bool,
}

impl LoggingSpeechService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device without speech synthesis.
    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    /// Everything spoken so far, oldest first.
    pub fn spoken(&self) -> Vec<String> {
        self.log().spoken.clone()
    }

    /// The utterance in progress, if not cancelled.
    pub fn speaking(&self) -> Option<String> {
        self.log().speaking.clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.log().cancels
    }

    fn log(&self) -> MutexGuard<'_, SpeechLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpeechService for LoggingSpeechService {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if self.unsupported {
            return Err(SpeechError::Unsupported);
        }
        tracing::info!(text, "Speaking");
        let mut log = self.log();
        log.spoken.push(text.to_string());
        log.speaking = Some(text.to_string());
        Ok(())
    }

    fn cancel(&self) {
        let mut log = self.log();
        if log.speaking.take().is_some() {
            tracing::debug!("Speech cancelled");
        }
        log.cancels += 1;
    }
}
