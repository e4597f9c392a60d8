//! Profile domain module.
//!
//! The profile document gates navigation through its `profileCompleted`
//! flag and carries the medical details the backend uses for advisories
//! and SOS alerts.

mod form;
mod medical;
mod record;

pub use form::{ProfileDetails, ProfileForm};
pub use medical::{Condition, EmergencyContact, Severity};
pub use record::ProfileRecord;
