//! Backend service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::Environment;

/// Where the advisory/chat/SOS backend lives.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://api.respi-guard.app/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate backend configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("backend.base_url"));
        }
        let is_https = url.starts_with("https://");
        if !is_https && !url.starts_with("http://") {
            return Err(ValidationError::InvalidBackendUrl(url.to_string()));
        }
        if environment.is_production() && !is_https {
            return Err(ValidationError::BackendMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
