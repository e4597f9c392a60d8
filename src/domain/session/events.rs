//! Identity change notifications delivered by the identity provider.

use crate::domain::foundation::Identity;

/// A change reported by the identity provider's notification stream.
///
/// Providers may repeat `Refreshed` with an identical identity on token
/// refresh, so consumers must treat every event idempotently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// First callback after start-up: the persisted session, if any.
    Restored(Option<Identity>),
    /// Interactive sign-in completed.
    SignedIn(Identity),
    /// Token refresh or profile reload (e.g. email just verified).
    Refreshed(Identity),
    /// The visitor signed out or the session was revoked.
    SignedOut,
}

impl IdentityEvent {
    /// The identity that is current after this event.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityEvent::Restored(identity) => identity.as_ref(),
            IdentityEvent::SignedIn(identity) | IdentityEvent::Refreshed(identity) => {
                Some(identity)
            }
            IdentityEvent::SignedOut => None,
        }
    }
}
