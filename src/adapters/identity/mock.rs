//! Mock identity provider for testing.
//!
//! Implements the `IdentityProvider` port in memory, avoiding the need
//! for a real hosted auth platform.
//!
//! # Example
//!
//! ```ignore
//! use respi_guard::adapters::identity::MockIdentityProvider;
//!
//! let provider = MockIdentityProvider::new()
//!     .with_account("ana@example.com", "secret1", identity);
//!
//! // Simulate the provider's first callback after start-up
//! provider.emit(IdentityEvent::Restored(None));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use secrecy::Secret;
use tokio::sync::broadcast;

use crate::domain::foundation::{
    AuthError, AuthProvider, Identity, OAuthProvider, PasswordCredentials, Registration, UserId,
};
use crate::domain::session::IdentityEvent;
use crate::ports::IdentityProvider;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    identity: Identity,
}

/// In-memory identity provider.
///
/// Accounts are keyed by email. Sign-in, registration and sign-out update
/// the current identity and publish the matching `IdentityEvent`.
#[derive(Debug)]
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    oauth_identity: RwLock<Option<Identity>>,
    current: RwLock<Option<Identity>>,
    events: broadcast::Sender<IdentityEvent>,
    /// Optional error to return for every operation (for error testing)
    force_error: RwLock<Option<AuthError>>,
    sign_out_error: RwLock<Option<AuthError>>,
    password_resets: RwLock<Vec<String>>,
    verification_emails: RwLock<Vec<String>>,
    next_uid: AtomicU64,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            accounts: RwLock::new(HashMap::new()),
            oauth_identity: RwLock::new(None),
            current: RwLock::new(None),
            events,
            force_error: RwLock::new(None),
            sign_out_error: RwLock::new(None),
            password_resets: RwLock::new(Vec::new()),
            verification_emails: RwLock::new(Vec::new()),
            next_uid: AtomicU64::new(1),
        }
    }
}

impl MockIdentityProvider {
    /// Creates a provider with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a password account.
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        identity: Identity,
    ) -> Self {
        self.accounts.write().unwrap().insert(
            email.into(),
            Account {
                password: password.into(),
                identity,
            },
        );
        self
    }

    /// Sets the identity returned by the OAuth popup.
    ///
    /// Without one, OAuth sign-in behaves as if the popup was dismissed.
    pub fn with_oauth_identity(self, identity: Identity) -> Self {
        *self.oauth_identity.write().unwrap() = Some(identity);
        self
    }

    /// Forces every operation to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Makes `sign_out` fail with the specified error.
    pub fn with_sign_out_error(self, error: AuthError) -> Self {
        *self.sign_out_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Publishes an event as the real provider would, updating the
    /// current identity to match.
    pub fn emit(&self, event: IdentityEvent) {
        *self.current.write().unwrap() = event.identity().cloned();
        // No subscribers yet is fine
        let _ = self.events.send(event);
    }

    /// Replaces the current identity without publishing anything.
    pub fn set_current(&self, identity: Option<Identity>) {
        *self.current.write().unwrap() = identity;
    }

    /// Marks the account's email as verified, as clicking the emailed link
    /// would. The change is visible after `reload`.
    pub fn verify_email(&self, email: &str) {
        let mut accounts = self.accounts.write().unwrap();
        if let Some(account) = accounts.get_mut(email) {
            account.identity.email_verified = true;
            let mut current = self.current.write().unwrap();
            if current.as_ref().map(|c| &c.id) == Some(&account.identity.id) {
                *current = Some(account.identity.clone());
            }
        }
    }

    /// Emails that received a password reset link.
    pub fn password_resets(&self) -> Vec<String> {
        self.password_resets.read().unwrap().clone()
    }

    /// Emails that received a verification link.
    pub fn verification_emails(&self) -> Vec<String> {
        self.verification_emails.read().unwrap().clone()
    }

    fn check_forced(&self) -> Result<(), AuthError> {
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn signed_in(&self, identity: Identity) -> Identity {
        self.emit(IdentityEvent::SignedIn(identity.clone()));
        identity
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<Identity, AuthError> {
        self.check_forced()?;
        let account = self
            .accounts
            .read()
            .unwrap()
            .get(credentials.email())
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;
        if account.password != credentials.password() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(self.signed_in(account.identity))
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<Identity, AuthError> {
        self.check_forced()?;
        let identity = self
            .oauth_identity
            .read()
            .unwrap()
            .clone()
            .filter(|identity| identity.auth_provider == AuthProvider::from(provider))
            .ok_or(AuthError::Cancelled)?;
        Ok(self.signed_in(identity))
    }

    async fn register(&self, registration: &Registration) -> Result<Identity, AuthError> {
        self.check_forced()?;
        let email = registration.credentials().email().to_string();
        if self.accounts.read().unwrap().contains_key(&email) {
            return Err(AuthError::AccountExists);
        }

        let n = self.next_uid.fetch_add(1, Ordering::SeqCst);
        let id = UserId::new(format!("uid-{}", n))?;
        let identity = Identity::new(id, false, AuthProvider::Password)
            .with_email(email.clone())
            .with_display_name(registration.display_name.clone());

        self.accounts.write().unwrap().insert(
            email.clone(),
            Account {
                password: registration.credentials().password().to_string(),
                identity: identity.clone(),
            },
        );
        self.verification_emails.write().unwrap().push(email);
        Ok(self.signed_in(identity))
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.check_forced()?;
        if !self.accounts.read().unwrap().contains_key(email) {
            return Err(AuthError::UserNotFound);
        }
        self.password_resets.write().unwrap().push(email.to_string());
        Ok(())
    }

    async fn reload(&self) -> Result<Option<Identity>, AuthError> {
        self.check_forced()?;
        Ok(self.current.read().unwrap().clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.check_forced()?;
        if let Some(error) = self.sign_out_error.read().unwrap().clone() {
            return Err(error);
        }
        self.emit(IdentityEvent::SignedOut);
        Ok(())
    }

    async fn id_token(&self) -> Result<Secret<String>, AuthError> {
        self.check_forced()?;
        self.current
            .read()
            .unwrap()
            .as_ref()
            .map(|identity| Secret::new(format!("token-{}", identity.id)))
            .ok_or(AuthError::NotSignedIn)
    }

    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.events.subscribe()
    }
}
