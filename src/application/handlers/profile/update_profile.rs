//! UpdateProfile - Command handler for editing the medical profile.

use std::sync::Arc;

use super::persist::{save_and_mirror, ProfileSaveOutcome};
use crate::application::{HandlerError, SessionStore};
use crate::domain::foundation::AuthError;
use crate::domain::profile::ProfileForm;
use crate::ports::{ProfileStore, ProfileSync};

/// Command to update the profile from the profile view.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub form: ProfileForm,
}

/// Handler for profile edits.
///
/// Leaves `profileCompleted` as it was.
pub struct UpdateProfileHandler {
    session: Arc<SessionStore>,
    profiles: Arc<dyn ProfileStore>,
    sync: Arc<dyn ProfileSync>,
}

impl UpdateProfileHandler {
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

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfileSaveOutcome, HandlerError> {
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotSignedIn)?;
        let details = cmd.form.validate()?;

        let outcome = save_and_mirror(
            self.profiles.as_ref(),
            self.sync.as_ref(),
            &identity,
            |record| record.apply(&details),
        )
        .await?;

        tracing::info!(user_id = %identity.id, "Profile updated");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::{Endpoint, MockBackend};
    use crate::adapters::identity::MockIdentityProvider;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::domain::foundation::{AuthProvider, Identity, UserId};
    use crate::domain::profile::{Condition, ProfileRecord, Severity};
    use crate::domain::session::IdentityEvent;
    use crate::ports::BackendError;

    fn uid() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn form() -> ProfileForm {
        ProfileForm {
            conditions: vec!["Asthma".into()],
            medications: "Salbutamol".into(),
            severity: Some(Severity::Moderate),
            home_city: "Delhi".into(),
            ..ProfileForm::default()
        }
    }

    fn setup(
        profiles: InMemoryProfileStore,
        backend: MockBackend,
    ) -> (Arc<InMemoryProfileStore>, UpdateProfileHandler) {
        let session = Arc::new(SessionStore::new(Arc::new(MockIdentityProvider::new())));
        session.apply(&IdentityEvent::SignedIn(Identity::new(
            uid(),
            true,
            AuthProvider::Password,
        )));
        let profiles = Arc::new(profiles);
        let handler = UpdateProfileHandler::new(session, profiles.clone(), Arc::new(backend));
        (profiles, handler)
    }

    #[tokio::test]
    async fn applies_form_and_keeps_completion_flag() {
        let mut existing = ProfileRecord::default();
        existing.mark_completed();
        existing.extra.insert("age".into(), serde_json::json!(34));
        let backend = MockBackend::new();
        let (profiles, handler) = setup(
            InMemoryProfileStore::new().with_profile(uid(), existing),
            backend.clone(),
        );

        let outcome = handler.handle(UpdateProfileCommand { form: form() }).await.unwrap();

        assert!(outcome.is_mirrored());
        let saved = profiles.get(&uid()).unwrap();
        assert!(saved.is_complete());
        assert_eq!(saved.conditions, vec![Condition::Asthma]);
        assert_eq!(saved.home_city.as_deref(), Some("Delhi"));
        assert_eq!(saved.extra.get("age"), Some(&serde_json::json!(34)));
        assert_eq!(backend.pushed_profiles(), vec![saved]);
    }

    #[tokio::test]
    async fn invalid_form_is_not_saved() {
        let backend = MockBackend::new();
        let (profiles, handler) = setup(InMemoryProfileStore::new(), backend.clone());
        let invalid = ProfileForm {
            severity: None,
            ..form()
        };

        let err = handler.handle(UpdateProfileCommand { form: invalid }).await.unwrap_err();

        assert!(matches!(err, HandlerError::Validation(_)));
        assert!(profiles.get(&uid()).is_none());
        assert_eq!(backend.call_count(Endpoint::UsersProfile), 0);
    }

    #[tokio::test]
    async fn mirror_failure_keeps_saved_document() {
        let backend =
            MockBackend::new().failing(Endpoint::UsersProfile, BackendError::network("reset"));
        let (profiles, handler) = setup(InMemoryProfileStore::new(), backend);

        let outcome = handler.handle(UpdateProfileCommand { form: form() }).await.unwrap();

        assert_eq!(outcome.mirror_error, Some(BackendError::network("reset")));
        assert!(profiles.get(&uid()).is_some());
    }
}
