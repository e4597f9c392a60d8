//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! session store, the SOS channel and the ports.

pub mod account;
pub mod chat;
pub mod dashboard;
pub mod profile;
pub mod sos;

pub use account::{
    OAuthSignInHandler, OAuthSignInResult, RegisterAccountCommand, RegisterAccountHandler,
    RegisterAccountResult,
};
pub use chat::AskDoctorHandler;
pub use dashboard::GetAdvisoryHandler;
pub use profile::{
    CompleteOnboardingCommand, CompleteOnboardingHandler, GetProfileHandler, ProfileSaveOutcome,
    UpdateProfileCommand, UpdateProfileHandler,
};
pub use sos::{ActivateSosHandler, ActivateSosResult, EndSosHandler, ReplayInstructionsHandler};
