//! Identity provider port.
//!
//! The identity provider owns accounts, credentials and email
//! verification. The client only asks it to act and listens to what it
//! reports.
//!
//! # Contract
//!
//! Implementations must:
//! - Emit `IdentityEvent::Restored` exactly once, after start-up, with the
//!   persisted session (or `None`)
//! - Emit `SignedIn`/`SignedOut` for interactive changes and `Refreshed`
//!   when a token refresh or reload changes nothing but the credential
//! - Propagate provider failures from `sign_out`; it must not fail silently

use async_trait::async_trait;
use secrecy::Secret;
use tokio::sync::broadcast;

use crate::domain::foundation::{
    AuthError, Identity, OAuthProvider, PasswordCredentials, Registration,
};
use crate::domain::session::IdentityEvent;

/// Sign-in, sign-out and change notifications from the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in with email and password.
    async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<Identity, AuthError>;

    /// Signs in through an OAuth popup.
    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<Identity, AuthError>;

    /// Creates a password account and sends the verification email.
    ///
    /// The new identity is signed in but unverified.
    async fn register(&self, registration: &Registration) -> Result<Identity, AuthError>;

    /// Sends a password reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Re-reads the current identity from the provider, picking up a
    /// freshly verified email.
    async fn reload(&self) -> Result<Option<Identity>, AuthError>;

    /// Ends the session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// A credential for the current identity, attached to backend calls.
    ///
    /// # Errors
    ///
    /// `AuthError::NotSignedIn` when nobody is signed in.
    async fn id_token(&self) -> Result<Secret<String>, AuthError>;

    /// Stream of identity changes.
    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent>;
}
