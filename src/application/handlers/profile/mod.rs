//! Profile handlers.
//!
//! Reads and writes the visitor's medical profile. Writes go to the
//! profile store first and are then mirrored to the backend.

mod complete_onboarding;
mod get_profile;
mod persist;
mod update_profile;

pub use complete_onboarding::{CompleteOnboardingCommand, CompleteOnboardingHandler};
pub use get_profile::GetProfileHandler;
pub use persist::ProfileSaveOutcome;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
