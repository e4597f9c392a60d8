//! Profile gate: classifies the visitor for authorization.

use std::sync::Arc;

use crate::domain::authorization::{
    classify_identity, classify_profile, GateEvaluation, ProfileLookup,
};
use crate::domain::foundation::Identity;
use crate::ports::{ProfileError, ProfileStore};

/// Classifies the current visitor into an `AuthorizationState`.
///
/// Every call fetches the profile afresh; nothing is cached between
/// evaluations because onboarding can complete mid-session.
pub struct ProfileGate {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileGate {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Evaluates the gate.
    ///
    /// 1. No identity: `Anonymous`
    /// 2. Unverified password identity: `Unverified` (OAuth is exempt)
    /// 3. Missing or incomplete profile: `Incomplete`
    /// 4. Otherwise `Authorized`
    ///
    /// A failed fetch never authorizes: it yields `Incomplete` with the
    /// error attached so the caller can offer a retry.
    pub async fn evaluate(&self, identity: Option<&Identity>) -> GateEvaluation {
        if let Some(state) = classify_identity(identity) {
            return GateEvaluation::new(state);
        }
        let Some(identity) = identity else {
            return classify_profile(ProfileLookup::NotFound);
        };

        let lookup = match self.profiles.fetch_profile(&identity.id).await {
            Ok(record) => ProfileLookup::Found(record),
            Err(ProfileError::NotFound(_)) => ProfileLookup::NotFound,
            Err(e) => {
                tracing::warn!(user_id = %identity.id, "Profile fetch failed: {}", e);
                ProfileLookup::Failed(e.to_string())
            }
        };
        classify_profile(lookup)
    }
}
