//! Profile document store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::profile::ProfileRecord;

/// Errors from the profile document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// No document exists for this identity.
    #[error("Profile not found for user {0}")]
    NotFound(UserId),

    /// The store could not be reached or refused the request.
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    /// A document could not be read or written in the expected shape.
    #[error("Profile document malformed: {0}")]
    Serialization(String),
}

impl ProfileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::NotFound(_))
    }

    /// Returns true if retrying later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProfileError::Unavailable(_))
    }
}

/// Document store keyed by `UserId`.
///
/// # Contract
///
/// - `fetch_profile` returns `ProfileError::NotFound` for a missing
///   document, distinct from transport failures
/// - `save_profile` replaces the whole document
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileRecord, ProfileError>;

    async fn save_profile(
        &self,
        user_id: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), ProfileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_unavailable() {
        let missing = ProfileError::NotFound(UserId::new("u1").unwrap());
        let down = ProfileError::Unavailable("connection reset".into());

        assert!(missing.is_not_found());
        assert!(!missing.is_transient());
        assert!(down.is_transient());
        assert!(!down.is_not_found());
        assert_eq!(missing.to_string(), "Profile not found for user u1");
    }

    #[test]
    fn profile_store_is_object_safe() {
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn ProfileStore>>();
    }
}
