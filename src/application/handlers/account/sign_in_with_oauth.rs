//! SignInWithOAuth - Command handler for OAuth sign-in.

use std::sync::Arc;

use crate::application::{HandlerError, SessionStore};
use crate::domain::foundation::{Identity, OAuthProvider};
use crate::domain::navigation::Route;
use crate::domain::profile::ProfileRecord;
use crate::ports::{ProfileError, ProfileStore};

/// Result of an OAuth sign-in.
#[derive(Debug, Clone)]
pub struct OAuthSignInResult {
    pub identity: Identity,
    /// True when this sign-in created the profile document.
    pub first_sign_in: bool,
    /// Onboarding for new or incomplete profiles, otherwise the dashboard.
    pub next: Route,
}

/// Handler for OAuth sign-in.
///
/// OAuth accounts skip registration, so the base document is created here
/// on first sign-in.
pub struct OAuthSignInHandler {
    session: Arc<SessionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl OAuthSignInHandler {
    pub fn new(session: Arc<SessionStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { session, profiles }
    }

    pub async fn handle(&self, provider: OAuthProvider) -> Result<OAuthSignInResult, HandlerError> {
        let identity = self.session.sign_in_with_oauth(provider).await?;

        let (first_sign_in, completed) = match self.profiles.fetch_profile(&identity.id).await {
            Ok(record) => (false, record.is_complete()),
            Err(ProfileError::NotFound(_)) => {
                let record = ProfileRecord::for_new_account(&identity);
                self.profiles.save_profile(&identity.id, &record).await?;
                tracing::info!(user_id = %identity.id, "Created profile document on first sign-in");
                (true, false)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(OAuthSignInResult {
            identity,
            first_sign_in,
            next: if completed {
                Route::Dashboard
            } else {
                Route::Onboarding
            },
        })
    }
}
