//! Session domain module.
//!
//! Describes what the client knows about the signed-in visitor. The
//! identity provider reports changes as `IdentityEvent`s; the session
//! folds them into a `SessionSnapshot`.

mod events;
mod snapshot;

pub use events::IdentityEvent;
pub use snapshot::SessionSnapshot;
