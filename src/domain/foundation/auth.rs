//! Authentication types for the domain layer.
//!
//! These types describe the signed-in visitor as reported by the identity
//! provider. They have **no external dependencies**: any provider adapter
//! can populate them through the `IdentityProvider` port.
//!
//! # Design Decisions
//!
//! - `AuthProvider` is a closed enum so that adding a sign-in method is a
//!   compile-time-visible change to every `match`
//! - `AuthError` is domain-centric, not provider-specific
//! - Credential forms validate locally before anything reaches the provider

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{UserId, ValidationError};

/// The sign-in method that produced an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email and password account.
    Password,
    /// Google OAuth.
    Google,
}

impl AuthProvider {
    /// Returns true when the provider itself vouches for the email address.
    ///
    /// Password accounts must confirm their address through the
    /// verification email before they count as verified.
    pub fn verifies_email(&self) -> bool {
        match self {
            AuthProvider::Password => false,
            AuthProvider::Google => true,
        }
    }

    /// Provider identifier as stored in user documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Password => "password",
            AuthProvider::Google => "google",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth providers available for interactive sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl From<OAuthProvider> for AuthProvider {
    fn from(provider: OAuthProvider) -> Self {
        match provider {
            OAuthProvider::Google => AuthProvider::Google,
        }
    }
}

/// The authenticated principal for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable identifier from the identity provider.
    pub id: UserId,

    /// Email address, when the provider shares one.
    pub email: Option<String>,

    /// Display name if available.
    pub display_name: Option<String>,

    /// Whether the provider reports the email as verified.
    pub email_verified: bool,

    /// How the visitor signed in.
    pub auth_provider: AuthProvider,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(id: UserId, email_verified: bool, auth_provider: AuthProvider) -> Self {
        Self {
            id,
            email: None,
            display_name: None,
            email_verified,
            auth_provider,
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns true if this identity still owes an email verification.
    ///
    /// OAuth identities are exempt; they are verified by the provider.
    pub fn needs_email_verification(&self) -> bool {
        !self.email_verified && !self.auth_provider.verifies_email()
    }
}

/// Authentication errors reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair was rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("An account already exists for this email")]
    AccountExists,

    /// No account matches the request.
    #[error("User not found")]
    UserNotFound,

    /// The operation needs a signed-in identity.
    #[error("Not signed in")]
    NotSignedIn,

    /// The stored credential expired and could not be refreshed.
    #[error("Session expired")]
    SessionExpired,

    /// The visitor dismissed the OAuth popup.
    #[error("Sign-in was cancelled")]
    Cancelled,

    /// Local validation failed before contacting the provider.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider is unreachable or misbehaving.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the visitor should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::NotSignedIn | AuthError::SessionExpired | AuthError::UserNotFound
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

const MIN_PASSWORD_LEN: usize = 6;

/// Email and password as typed into the login form.
#[derive(Clone)]
pub struct PasswordCredentials {
    email: String,
    password: String,
}

impl PasswordCredentials {
    /// Validates and builds credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ValidationError> {
        let email = validate_email(email.into())?;
        let password = password.into();
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// New account request from the registration form.
#[derive(Clone)]
pub struct Registration {
    pub display_name: String,
    credentials: PasswordCredentials,
}

impl Registration {
    /// Validates and builds a registration request.
    ///
    /// Passwords shorter than six characters are rejected locally.
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        Ok(Self {
            display_name,
            credentials: PasswordCredentials::new(email, password)?,
        })
    }

    pub fn credentials(&self) -> &PasswordCredentials {
        &self.credentials
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("display_name", &self.display_name)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Normalizes and checks an email address.
pub fn validate_email(email: String) -> Result<String, ValidationError> {
    let email = email.trim().to_string();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !well_formed || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format("email", "not an email address"));
    }
    Ok(email)
}
