//! Point-in-time view of the session.

use super::IdentityEvent;
use crate::domain::foundation::Identity;

/// What the session knows about the current visitor.
///
/// `Loading` is distinct from `SignedOut`: before the identity provider's
/// first callback nothing is known, and treating that as anonymous would
/// bounce a slow-to-restore signed-in visitor to the login view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionSnapshot {
    #[default]
    Loading,
    SignedOut,
    SignedIn(Identity),
}

impl SessionSnapshot {
    /// Builds the snapshot that results from a provider event.
    pub fn from_event(event: &IdentityEvent) -> Self {
        match event.identity() {
            Some(identity) => SessionSnapshot::SignedIn(identity.clone()),
            None => SessionSnapshot::SignedOut,
        }
    }

    /// Returns true until the provider has reported for the first time.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionSnapshot::Loading)
    }

    /// The current identity, if signed in.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionSnapshot::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}
