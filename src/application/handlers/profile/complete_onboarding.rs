//! CompleteOnboarding - Command handler for the onboarding wizard.

use std::sync::Arc;

use super::persist::{save_and_mirror, ProfileSaveOutcome};
use crate::application::{HandlerError, SessionStore};
use crate::domain::foundation::AuthError;
use crate::domain::profile::ProfileForm;
use crate::ports::{ProfileStore, ProfileSync};

/// Command to finish onboarding.
#[derive(Debug, Clone)]
pub struct CompleteOnboardingCommand {
    pub form: ProfileForm,
}

/// Handler for onboarding.
///
/// Saves the details with `profileCompleted = true`; the next guard
/// evaluation then lets the visitor through to the dashboard.
pub struct CompleteOnboardingHandler {
    session: Arc<SessionStore>,
    profiles: Arc<dyn ProfileStore>,
    sync: Arc<dyn ProfileSync>,
}

impl CompleteOnboardingHandler {
    pub fn new(
        session: Arc<SessionStore>,
        profiles: Arc<dyn ProfileStore>,
        sync: Arc<dyn ProfileSync>,
    ) -> Self {
        Self {
            session,
            profiles,
            sync,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteOnboardingCommand,
    ) -> Result<ProfileSaveOutcome, HandlerError> {
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotSignedIn)?;
        let details = cmd.form.validate()?;

        let outcome = save_and_mirror(
            self.profiles.as_ref(),
            self.sync.as_ref(),
            &identity,
            |record| {
                record.apply(&details);
                record.mark_completed();
            },
        )
        .await?;

        tracing::info!(user_id = %identity.id, "Onboarding completed");
        Ok(outcome)
    }
}
