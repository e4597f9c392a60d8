//! Medical value objects captured during onboarding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A respiratory condition the visitor reports.
///
/// Values outside the onboarding list are kept verbatim so documents
/// written by other clients still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Asthma,
    DustAllergy,
    Sinusitis,
    None,
    Other(String),
}

impl Condition {
    /// Conditions offered by the onboarding form, in display order.
    pub const ONBOARDING_CHOICES: [Condition; 4] = [
        Condition::Asthma,
        Condition::DustAllergy,
        Condition::Sinusitis,
        Condition::None,
    ];

    pub fn label(&self) -> &str {
        match self {
            Condition::Asthma => "Asthma",
            Condition::DustAllergy => "Dust Allergy",
            Condition::Sinusitis => "Sinusitis",
            Condition::None => "None",
            Condition::Other(label) => label,
        }
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        match value.trim() {
            "Asthma" => Condition::Asthma,
            "Dust Allergy" => Condition::DustAllergy,
            "Sinusitis" => Condition::Sinusitis,
            "None" => Condition::None,
            _ => Condition::Other(value),
        }
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Self-reported severity of the visitor's condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

/// Person contacted by the backend when SOS is triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
}

impl EmergencyContact {
    /// Validates name and phone number.
    ///
    /// Phones may contain spaces, dashes and a leading `+`; they must hold
    /// between 7 and 15 digits.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("emergency_contact.name"));
        }

        let phone = phone.into().trim().to_string();
        if phone.is_empty() {
            return Err(ValidationError::empty_field("emergency_contact.phone"));
        }
        let body = phone.strip_prefix('+').unwrap_or(&phone);
        if !body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        {
            return Err(ValidationError::invalid_format(
                "emergency_contact.phone",
                "only digits, spaces and dashes are allowed",
            ));
        }
        let digits = body.chars().filter(char::is_ascii_digit).count();
        if !(7..=15).contains(&digits) {
            return Err(ValidationError::out_of_range(
                "emergency_contact.phone",
                7,
                15,
                digits,
            ));
        }

        Ok(Self { name, phone })
    }
}
