//! Profile form input as submitted by the onboarding and profile views.

use super::{Condition, EmergencyContact, Severity};
use crate::domain::foundation::ValidationError;

const MAX_MEDICATIONS_LEN: usize = 500;
const MAX_CITY_LEN: usize = 100;

/// Raw form fields before validation.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub conditions: Vec<String>,
    pub medications: String,
    pub severity: Option<Severity>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub home_city: String,
}

/// Profile fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDetails {
    pub conditions: Vec<Condition>,
    pub medications: Option<String>,
    pub severity: Severity,
    pub emergency_contact: Option<EmergencyContact>,
    pub home_city: Option<String>,
}

impl ProfileForm {
    /// Validates the form.
    ///
    /// At least one condition is required and "None" cannot be combined
    /// with another condition. The emergency contact is optional, but if
    /// either of its fields is filled both must be valid.
    pub fn validate(&self) -> Result<ProfileDetails, ValidationError> {
        let mut conditions: Vec<Condition> = Vec::new();
        for raw in &self.conditions {
            if raw.trim().is_empty() {
                continue;
            }
            let condition = Condition::from(raw.trim().to_string());
            if !conditions.contains(&condition) {
                conditions.push(condition);
            }
        }
        if conditions.is_empty() {
            return Err(ValidationError::empty_field("conditions"));
        }
        if conditions.len() > 1 && conditions.contains(&Condition::None) {
            return Err(ValidationError::invalid_format(
                "conditions",
                "\"None\" cannot be combined with other conditions",
            ));
        }

        let severity = self
            .severity
            .ok_or_else(|| ValidationError::empty_field("severity"))?;

        let medications = optional_text(&self.medications, "medications", MAX_MEDICATIONS_LEN)?;
        let home_city = optional_text(&self.home_city, "home_city", MAX_CITY_LEN)?;

        let emergency_contact = if self.emergency_contact_name.trim().is_empty()
            && self.emergency_contact_phone.trim().is_empty()
        {
            None
        } else {
            Some(EmergencyContact::new(
                self.emergency_contact_name.as_str(),
                self.emergency_contact_phone.as_str(),
            )?)
        };

        Ok(ProfileDetails {
            conditions,
            medications,
            severity,
            emergency_contact,
            home_city,
        })
    }
}

fn optional_text(
    value: &str,
    field: &str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(Some(trimmed.to_string()))
}
