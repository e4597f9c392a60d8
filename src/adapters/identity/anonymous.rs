//! Identity provider for running without a hosted identity service.
//!
//! Nobody can sign in. The provider reports a signed-out session to every
//! subscriber so the session store leaves `Loading`, and refuses every
//! interactive operation as unavailable.

use async_trait::async_trait;
use secrecy::Secret;
use tokio::sync::broadcast;

use crate::domain::foundation::{
    AuthError, Identity, OAuthProvider, PasswordCredentials, Registration,
};
use crate::domain::session::IdentityEvent;
use crate::ports::IdentityProvider;

const EVENT_CAPACITY: usize = 4;

#[derive(Debug)]
pub struct AnonymousIdentityProvider {
    events: broadcast::Sender<IdentityEvent>,
}

impl Default for AnonymousIdentityProvider {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { events }
    }
}

impl AnonymousIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unavailable() -> AuthError {
    AuthError::service_unavailable("no identity service configured")
}

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn sign_in_with_password(
        &self,
        _credentials: &PasswordCredentials,
    ) -> Result<Identity, AuthError> {
        Err(unavailable())
    }

    async fn sign_in_with_oauth(&self, _provider: OAuthProvider) -> Result<Identity, AuthError> {
        Err(unavailable())
    }

    async fn register(&self, _registration: &Registration) -> Result<Identity, AuthError> {
        Err(unavailable())
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Err(unavailable())
    }

    async fn reload(&self) -> Result<Option<Identity>, AuthError> {
        Ok(None)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn id_token(&self) -> Result<Secret<String>, AuthError> {
        Err(AuthError::NotSignedIn)
    }

    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        let receiver = self.events.subscribe();
        // Repeats reach earlier subscribers too; a second `Restored(None)`
        // leaves their snapshot unchanged.
        let _ = self.events.send(IdentityEvent::Restored(None));
        receiver
    }
}
