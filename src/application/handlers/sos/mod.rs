//! SOS handlers.
//!
//! Activation, replay and end of an emergency session.

mod activate_sos;
mod end_sos;
mod replay_instructions;

pub use activate_sos::{ActivateSosHandler, ActivateSosResult};
pub use end_sos::EndSosHandler;
pub use replay_instructions::ReplayInstructionsHandler;
