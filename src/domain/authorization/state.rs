//! Authorization classification of the current visitor.

use std::fmt;

/// Derived, never stored: where the visitor stands in the sign-up funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationState {
    /// No identity.
    Anonymous,
    /// Password account whose email is not yet verified.
    Unverified,
    /// Signed in, but the profile is missing, incomplete or unreadable.
    Incomplete,
    /// Signed in with a completed profile.
    Authorized,
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthorizationState::Anonymous => "anonymous",
            AuthorizationState::Unverified => "unverified",
            AuthorizationState::Incomplete => "incomplete",
            AuthorizationState::Authorized => "authorized",
        };
        f.write_str(s)
    }
}
