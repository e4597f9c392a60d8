//! The visitor's profile document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Condition, EmergencyContact, ProfileDetails, Severity};
use crate::domain::foundation::{AuthProvider, Identity, UserId};

/// Profile document keyed 1:1 by `UserId`.
///
/// Only `profileCompleted` matters for authorization; the medical fields
/// are carried for the profile and onboarding views. Unknown fields are
/// preserved so a save never drops data written by another client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "profileCompleted", default)]
    pub profile_completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AuthProvider>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_city: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    /// Base document written when an account is first created.
    ///
    /// Starts incomplete so the visitor is routed through onboarding.
    pub fn for_new_account(identity: &Identity) -> Self {
        Self {
            profile_completed: false,
            uid: Some(identity.id.clone()),
            name: identity.display_name.clone(),
            email: identity.email.clone(),
            provider: Some(identity.auth_provider),
            ..Self::default()
        }
    }

    /// Returns true only for an explicit `profileCompleted: true`.
    pub fn is_complete(&self) -> bool {
        self.profile_completed
    }

    /// Copies validated form details into the document.
    pub fn apply(&mut self, details: &ProfileDetails) {
        self.conditions = details.conditions.clone();
        self.medications = details.medications.clone();
        self.severity = Some(details.severity);
        self.emergency_contact = details.emergency_contact.clone();
        self.home_city = details.home_city.clone();
    }

    /// Marks onboarding as done.
    pub fn mark_completed(&mut self) {
        self.profile_completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_flag_means_incomplete() {
        let record: ProfileRecord = serde_json::from_value(json!({"uid": "u1"})).unwrap();
        assert!(!record.is_complete());
    }

    #[test]
    fn reads_camel_case_flag() {
        let record: ProfileRecord =
            serde_json::from_value(json!({"profileCompleted": true})).unwrap();
        assert!(record.is_complete());
    }

    #[test]
    fn preserves_unknown_fields() {
        let source = json!({
            "profileCompleted": true,
            "age": 34,
            "createdAt": "2024-01-01"
        });
        let record: ProfileRecord = serde_json::from_value(source).unwrap();
        assert_eq!(record.extra.get("age"), Some(&json!(34)));

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["createdAt"], json!("2024-01-01"));
        assert_eq!(written["profileCompleted"], json!(true));
    }

    #[test]
    fn new_account_document_is_incomplete() {
        let identity = Identity::new(UserId::new("u1").unwrap(), false, AuthProvider::Password)
            .with_email("ana@example.com")
            .with_display_name("Ana");
        let record = ProfileRecord::for_new_account(&identity);

        assert!(!record.is_complete());
        assert_eq!(record.provider, Some(AuthProvider::Password));
        assert_eq!(record.name.as_deref(), Some("Ana"));

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["provider"], json!("password"));
    }
}
