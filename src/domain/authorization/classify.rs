//! Pure classification rules behind the profile gate.

use super::AuthorizationState;
use crate::domain::foundation::Identity;
use crate::domain::profile::ProfileRecord;

/// Outcome of looking up the visitor's profile document.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    /// The document exists.
    Found(ProfileRecord),
    /// No document for this identity.
    NotFound,
    /// The store could not answer; carries the reason for the notice.
    Failed(String),
}

/// Result of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateEvaluation {
    pub state: AuthorizationState,
    /// Set when the profile could not be read. The visitor may retry.
    pub profile_error: Option<String>,
}

impl GateEvaluation {
    pub fn new(state: AuthorizationState) -> Self {
        Self {
            state,
            profile_error: None,
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            state: AuthorizationState::Incomplete,
            profile_error: Some(reason),
        }
    }
}

/// Checks that do not need the profile document.
///
/// Returns `None` when the profile must be consulted to decide.
pub fn classify_identity(identity: Option<&Identity>) -> Option<AuthorizationState> {
    match identity {
        None => Some(AuthorizationState::Anonymous),
        Some(identity) if identity.needs_email_verification() => {
            Some(AuthorizationState::Unverified)
        }
        Some(_) => None,
    }
}

/// Final classification once the profile lookup has settled.
///
/// Fails closed: anything other than a document with an explicit
/// `profileCompleted: true` is `Incomplete`.
pub fn classify_profile(lookup: ProfileLookup) -> GateEvaluation {
    match lookup {
        ProfileLookup::Found(record) if record.is_complete() => {
            GateEvaluation::new(AuthorizationState::Authorized)
        }
        ProfileLookup::Found(_) | ProfileLookup::NotFound => {
            GateEvaluation::new(AuthorizationState::Incomplete)
        }
        ProfileLookup::Failed(reason) => GateEvaluation::failed(reason),
    }
}
