//! RegisterAccount - Command handler for email/password sign-up.

use std::sync::Arc;

use crate::application::{HandlerError, SessionStore};
use crate::domain::foundation::{Identity, Registration};
use crate::domain::navigation::Route;
use crate::domain::profile::ProfileRecord;
use crate::ports::ProfileStore;

/// Command to create an account.
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub identity: Identity,
    /// Where to send the visitor: the login view, until they verify.
    pub next: Route,
}

/// Handler for registration.
pub struct RegisterAccountHandler {
    session: Arc<SessionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl RegisterAccountHandler {
    pub fn new(session: Arc<SessionStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { session, profiles }
    }

    pub async fn handle(
        &self,
        cmd: RegisterAccountCommand,
    ) -> Result<RegisterAccountResult, HandlerError> {
        // 1. Validate locally; nothing invalid reaches the provider
        let registration = Registration::new(cmd.name, cmd.email, cmd.password)?;

        // 2. Create the account (the provider sends the verification email)
        let identity = self.session.register(&registration).await?;

        // 3. Base document, incomplete until onboarding
        let mut record = ProfileRecord::for_new_account(&identity);
        record.name = Some(registration.display_name.clone());
        record.email = Some(registration.credentials().email().to_string());
        self.profiles.save_profile(&identity.id, &record).await?;

        tracing::info!(user_id = %identity.id, "Account registered");
        Ok(RegisterAccountResult {
            identity,
            next: Route::Login,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::identity::MockIdentityProvider;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::domain::foundation::{AuthError, AuthProvider};

    fn command(password: &str) -> RegisterAccountCommand {
        RegisterAccountCommand {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: password.to_string(),
        }
    }

    fn handler(
        provider: MockIdentityProvider,
    ) -> (Arc<MockIdentityProvider>, Arc<InMemoryProfileStore>, RegisterAccountHandler) {
        let provider = Arc::new(provider);
        let profiles = Arc::new(InMemoryProfileStore::new());
        let session = Arc::new(SessionStore::new(provider.clone()));
        let handler = RegisterAccountHandler::new(session, profiles.clone());
        (provider, profiles, handler)
    }

    #[tokio::test]
    async fn creates_incomplete_document_and_sends_verification() {
        let (provider, profiles, handler) = handler(MockIdentityProvider::new());

        let result = handler.handle(command("secret1")).await.unwrap();

        assert!(!result.identity.email_verified);
        assert_eq!(result.next, Route::Login);
        let record = profiles.get(&result.identity.id).unwrap();
        assert!(!record.is_complete());
        assert_eq!(record.provider, Some(AuthProvider::Password));
        assert_eq!(record.name.as_deref(), Some("Ana"));
        assert_eq!(provider.verification_emails(), vec!["ana@example.com"]);
    }

    #[tokio::test]
    async fn short_password_never_reaches_provider() {
        let (provider, profiles, handler) = handler(MockIdentityProvider::new());

        let err = handler.handle(command("12345")).await.unwrap_err();

        assert!(matches!(err, HandlerError::Validation(_)));
        assert!(provider.verification_emails().is_empty());
        assert_eq!(profiles.fetch_count(), 0);
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let (_, _, handler) =
            handler(MockIdentityProvider::new().with_error(AuthError::AccountExists));

        let err = handler.handle(command("secret1")).await.unwrap_err();

        assert_eq!(err, HandlerError::Auth(AuthError::AccountExists));
    }
}
