//! Air quality domain module.
//!
//! The backend owns the AQI and advisory computation; these types only
//! describe its reply and map the 1-5 index to a display category.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Air quality at the visitor's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiReading {
    /// Coarse 1-5 index.
    pub aqi_index: u8,
    /// PM2.5 concentration in µg/m³.
    pub pm2_5: f64,
    /// Indian National AQI.
    pub indian_aqi: u32,
}

impl AqiReading {
    pub fn category(&self) -> AqiCategory {
        AqiCategory::from_index(self.aqi_index)
    }
}

/// Display category for the 1-5 index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    Severe,
    Unknown,
}

impl AqiCategory {
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => AqiCategory::Good,
            2 => AqiCategory::Satisfactory,
            3 => AqiCategory::Moderate,
            4 => AqiCategory::Poor,
            5 => AqiCategory::Severe,
            _ => AqiCategory::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::Severe => "Severe",
            AqiCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Medical advisory generated for the reading and the visitor's profile.
///
/// `activities` is backend-defined (activity name to guidance) and kept
/// as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub advisory_text: String,
    #[serde(default)]
    pub activities: Value,
}

/// Full `/get-advisory` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub aqi: AqiReading,
    pub advisory: Advisory,
}

/// Turns `snake_case` keys into title text, e.g. `outdoor_running`
/// becomes `Outdoor Running`.
pub fn format_title(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
