//! Account handlers.
//!
//! Registration and OAuth sign-in, which also create the base profile
//! document.

mod register_account;
mod sign_in_with_oauth;

pub use register_account::{
    RegisterAccountCommand, RegisterAccountHandler, RegisterAccountResult,
};
pub use sign_in_with_oauth::{OAuthSignInHandler, OAuthSignInResult};
