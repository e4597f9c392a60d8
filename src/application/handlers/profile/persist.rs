//! Save-then-mirror shared by the profile write handlers.

use crate::application::HandlerError;
use crate::domain::foundation::Identity;
use crate::domain::profile::ProfileRecord;
use crate::ports::{BackendError, ProfileError, ProfileStore, ProfileSync};

/// Outcome of a profile write.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSaveOutcome {
    pub record: ProfileRecord,
    /// Set when the document was saved but the backend copy was not
    /// updated. The saved document is not rolled back.
    pub mirror_error: Option<BackendError>,
}

impl ProfileSaveOutcome {
    pub fn is_mirrored(&self) -> bool {
        self.mirror_error.is_none()
    }
}

/// Loads the visitor's document (or a fresh one), applies `update`, saves
/// it, then mirrors it to the backend.
pub(super) async fn save_and_mirror<F>(
    profiles: &dyn ProfileStore,
    sync: &dyn ProfileSync,
    identity: &Identity,
    update: F,
) -> Result<ProfileSaveOutcome, HandlerError>
where
    F: FnOnce(&mut ProfileRecord) + Send,
{
    let mut record = match profiles.fetch_profile(&identity.id).await {
        Ok(record) => record,
        Err(ProfileError::NotFound(_)) => ProfileRecord::for_new_account(identity),
        Err(e) => return Err(e.into()),
    };
    update(&mut record);
    profiles.save_profile(&identity.id, &record).await?;

    let mirror_error = match sync.push_profile(&identity.id, &record).await {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(user_id = %identity.id, "Profile saved but backend mirror failed: {}", e);
            Some(e)
        }
    };

    Ok(ProfileSaveOutcome {
        record,
        mirror_error,
    })
}
