//! Domain layer - Core business logic and entities.
//!
//! Pure types and rules with no I/O: identities, profiles, the
//! authorization classification, SOS records and the navigation table.

pub mod air_quality;
pub mod authorization;
pub mod chat;
pub mod foundation;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod sos;
