//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RESPI_GUARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use respi_guard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.backend.base_url);
//! ```

mod backend;
mod environment;
mod error;
mod location;
mod logging;
mod storage;

pub use backend::BackendConfig;
pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use location::LocationConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Backend service (advisory, chat, SOS alert, profile mirror)
    #[serde(default)]
    pub backend: BackendConfig,

    /// Durable local storage (SOS flag)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional fixed position for headless use
    #[serde(default)]
    pub location: Option<LocationConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RESPI_GUARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RESPI_GUARD__BACKEND__BASE_URL=...` -> `backend.base_url = ...`
    /// - `RESPI_GUARD__STORAGE__PATH=...` -> `storage.path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RESPI_GUARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate(self.environment)?;
        self.storage.validate()?;
        self.logging.validate()?;
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "RESPI_GUARD__ENVIRONMENT",
        "RESPI_GUARD__BACKEND__BASE_URL",
        "RESPI_GUARD__BACKEND__TIMEOUT_SECS",
        "RESPI_GUARD__STORAGE__PATH",
        "RESPI_GUARD__LOGGING__JSON",
        "RESPI_GUARD__LOCATION__LAT",
        "RESPI_GUARD__LOCATION__LON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.storage.sos_key, "respi_guard_sos");
        assert!(config.location.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RESPI_GUARD__BACKEND__BASE_URL", "https://api.example.com");
        env::set_var("RESPI_GUARD__BACKEND__TIMEOUT_SECS", "10");
        env::set_var("RESPI_GUARD__STORAGE__PATH", "/tmp/respi.json");
        env::set_var("RESPI_GUARD__LOGGING__JSON", "true");
        env::set_var("RESPI_GUARD__LOCATION__LAT", "28.61");
        env::set_var("RESPI_GUARD__LOCATION__LON", "77.21");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/respi.json"));
        assert!(config.logging.json);
        assert_eq!(config.location.map(|l| l.lat), Some(28.61));
    }

    #[test]
    fn test_production_rejects_plain_http() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RESPI_GUARD__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::BackendMustBeHttps));
    }
}
