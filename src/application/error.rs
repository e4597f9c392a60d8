//! Error type shared by the application handlers.

use thiserror::Error;

use super::SosError;
use crate::domain::foundation::{AuthError, ValidationError};
use crate::ports::{BackendError, LocationError, ProfileError, SpeechError};

/// Everything a handler can fail with.
///
/// Nothing here is fatal: each variant maps to a notice the visitor can
/// act on, usually by resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Sos(#[from] SosError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error("No active SOS session")]
    NoActiveSos,
}

impl HandlerError {
    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            HandlerError::Validation(e) => e.to_string(),
            HandlerError::Auth(AuthError::NotSignedIn) => "Please login to continue".to_string(),
            HandlerError::Auth(e) => e.to_string(),
            HandlerError::Profile(_) => "Failed to load or save your profile".to_string(),
            HandlerError::Backend(BackendError::Timeout { .. }) => {
                "The server took too long to respond. Please try again.".to_string()
            }
            HandlerError::Backend(_) => "Could not reach the server. Please try again.".to_string(),
            HandlerError::Location(LocationError::PermissionDenied) => {
                "Location access is required for this feature".to_string()
            }
            HandlerError::Location(_) => "Could not determine your location".to_string(),
            HandlerError::Sos(_) => "Could not access the emergency session".to_string(),
            HandlerError::Speech(_) => "Voice instructions are unavailable".to_string(),
            HandlerError::NoActiveSos => "No active SOS session".to_string(),
        }
    }

    /// Returns true if resubmitting the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            HandlerError::Auth(e) => e.is_transient(),
            HandlerError::Profile(e) => e.is_transient(),
            HandlerError::Backend(e) => e.is_retryable(),
            HandlerError::Location(e) => !matches!(e, LocationError::PermissionDenied),
            HandlerError::Sos(_) => true,
            HandlerError::Speech(e) => !matches!(e, SpeechError::Unsupported),
            HandlerError::Validation(_) | HandlerError::NoActiveSos => false,
        }
    }
}
