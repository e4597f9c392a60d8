//! GetProfile - Query handler for the signed-in visitor's profile.

use std::sync::Arc;

use crate::application::{HandlerError, SessionStore};
use crate::domain::foundation::AuthError;
use crate::domain::profile::ProfileRecord;
use crate::ports::{ProfileError, ProfileStore};

/// Handler for reading the current profile.
pub struct GetProfileHandler {
    session: Arc<SessionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl GetProfileHandler {
    pub fn new(session: Arc<SessionStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { session, profiles }
    }

    /// Returns `None` when no document exists yet.
    pub async fn handle(&self) -> Result<Option<ProfileRecord>, HandlerError> {
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotSignedIn)?;

        match self.profiles.fetch_profile(&identity.id).await {
            Ok(record) => Ok(Some(record)),
            Err(ProfileError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
