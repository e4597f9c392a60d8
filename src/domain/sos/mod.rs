//! Emergency (SOS) domain module.
//!
//! An active `SosSession` overrides every other navigation decision until
//! the visitor explicitly ends it.

mod alert;
mod session;

pub use alert::SosAlert;
pub use session::{SosPayload, SosSession, SosStatus, SOS_STORAGE_KEY};
