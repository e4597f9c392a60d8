//! Local storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::sos::SOS_STORAGE_KEY;

/// Durable device-local storage.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Key under which the SOS session is stored
    #[serde(default = "default_sos_key")]
    pub sos_key: String,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.path"));
        }
        if self.sos_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.sos_key"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            sos_key: default_sos_key(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./data/local_storage.json")
}

fn default_sos_key() -> String {
    SOS_STORAGE_KEY.to_string()
}
