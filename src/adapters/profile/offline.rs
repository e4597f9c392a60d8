//! Profile store for running without a document service.
//!
//! Every call reports the store as unavailable, so the profile gate fails
//! closed if it is ever reached.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileRecord;
use crate::ports::{ProfileError, ProfileStore};

#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProfileStore;

impl OfflineProfileStore {
    pub fn new() -> Self {
        Self
    }
}

fn offline() -> ProfileError {
    ProfileError::Unavailable("no document service configured".to_string())
}

#[async_trait]
impl ProfileStore for OfflineProfileStore {
    async fn fetch_profile(&self, _user_id: &UserId) -> Result<ProfileRecord, ProfileError> {
        Err(offline())
    }

    async fn save_profile(
        &self,
        _user_id: &UserId,
        _record: &ProfileRecord,
    ) -> Result<(), ProfileError> {
        Err(offline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ProfileGate;
    use crate::domain::authorization::AuthorizationState;
    use crate::domain::foundation::{AuthProvider, Identity};
    use std::sync::Arc;

    #[tokio::test]
    async fn every_call_is_unavailable() {
        let store = OfflineProfileStore::new();
        let uid = UserId::new("user-1").unwrap();

        assert!(matches!(
            store.fetch_profile(&uid).await,
            Err(ProfileError::Unavailable(_))
        ));
        assert!(matches!(
            store.save_profile(&uid, &ProfileRecord::default()).await,
            Err(ProfileError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn gate_fails_closed_on_offline_store() {
        let gate = ProfileGate::new(Arc::new(OfflineProfileStore::new()));
        let identity = Identity::new(UserId::new("user-1").unwrap(), true, AuthProvider::Google);

        let evaluation = gate.evaluate(Some(&identity)).await;

        assert_eq!(evaluation.state, AuthorizationState::Incomplete);
        assert!(evaluation.profile_error.is_some());
    }
}
