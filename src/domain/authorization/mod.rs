//! Authorization domain module.
//!
//! Classifies the visitor into an `AuthorizationState` from the identity
//! and, when needed, the profile document. The rules are pure; the
//! application layer's `ProfileGate` performs the lookup.

mod classify;
mod state;

pub use classify::{classify_identity, classify_profile, GateEvaluation, ProfileLookup};
pub use state::AuthorizationState;
