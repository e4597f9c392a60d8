//! In-memory profile store.
//!
//! Documents live in a map keyed by user. Used by tests and local
//! development in place of the hosted document database.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileRecord;
use crate::ports::{ProfileError, ProfileStore};

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, ProfileRecord>>,
    /// Optional error to return for every call (for error testing)
    force_error: RwLock<Option<ProfileError>>,
    fetches: RwLock<u32>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document.
    pub fn with_profile(self, user_id: UserId, record: ProfileRecord) -> Self {
        self.profiles.write().unwrap().insert(user_id, record);
        self
    }

    /// Forces every call to return the specified error.
    pub fn with_error(self, error: ProfileError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn set_error(&self, error: Option<ProfileError>) {
        *self.force_error.write().unwrap() = error;
    }

    pub fn get(&self, user_id: &UserId) -> Option<ProfileRecord> {
        self.profiles.read().unwrap().get(user_id).cloned()
    }

    /// Number of `fetch_profile` calls served so far.
    pub fn fetch_count(&self) -> u32 {
        *self.fetches.read().unwrap()
    }

    fn check_forced(&self) -> Result<(), ProfileError> {
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileRecord, ProfileError> {
        *self.fetches.write().unwrap() += 1;
        self.check_forced()?;
        self.get(user_id)
            .ok_or_else(|| ProfileError::NotFound(user_id.clone()))
    }

    async fn save_profile(
        &self,
        user_id: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), ProfileError> {
        self.check_forced()?;
        self.profiles
            .write()
            .unwrap()
            .insert(user_id.clone(), record.clone());
        Ok(())
    }
}
