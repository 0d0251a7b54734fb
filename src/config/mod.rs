//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config`
//! and `dotenvy` crates, with the `CAREER_COMPASS` prefix and `__` between
//! nested keys. Every section has defaults, so an empty environment is a
//! valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use career_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod content;
mod error;
mod features;
mod logging;
mod storage;

pub use content::ContentConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Progress store selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Narrative selection
    #[serde(default)]
    pub content: ContentConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CAREER_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CAREER_COMPASS__STORAGE__BACKEND=file` -> `storage.backend = file`
    /// - `CAREER_COMPASS__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAREER_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.logging.validate()?;
        self.content.validate()?;
        Ok(())
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

    const VARS: [&str; 6] = [
        "CAREER_COMPASS__STORAGE__BACKEND",
        "CAREER_COMPASS__STORAGE__DATA_DIR",
        "CAREER_COMPASS__LOGGING__FILTER",
        "CAREER_COMPASS__LOGGING__JSON",
        "CAREER_COMPASS__CONTENT__NARRATIVE",
        "CAREER_COMPASS__FEATURES__ENABLE_RESUME",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.filter, "info");
        assert!(config.content.narrative.is_none());
        assert!(config.features.enable_resume);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAREER_COMPASS__STORAGE__BACKEND", "file");
        env::set_var("CAREER_COMPASS__STORAGE__DATA_DIR", "/tmp/progress");
        env::set_var("CAREER_COMPASS__LOGGING__JSON", "true");
        env::set_var("CAREER_COMPASS__CONTENT__NARRATIVE", "gamedev");
        env::set_var("CAREER_COMPASS__FEATURES__ENABLE_RESUME", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/progress"));
        assert!(config.logging.json);
        assert_eq!(config.content.narrative.as_deref(), Some("gamedev"));
        assert!(!config.features.enable_resume);
        assert!(config.features.persist_progress);
    }

    #[test]
    fn test_invalid_backend_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAREER_COMPASS__STORAGE__BACKEND", "postgres");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_blank_log_filter() {
        let config = AppConfig {
            logging: LoggingConfig {
                filter: String::new(),
                json: false,
            },
            ..AppConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyLogFilter));
    }
}
