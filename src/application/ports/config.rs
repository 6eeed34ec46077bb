//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage.
    ///
    /// # Returns
    /// The loaded config (all fields None if the file doesn't exist)
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save configuration to storage.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Initialize configuration file with defaults.
    /// Fails if file already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Defaults overlaid with whatever the stored file sets.
    ///
    /// An unreadable file is logged and treated as empty.
    async fn load_effective(&self) -> AppConfig {
        match self.load().await {
            Ok(stored) => AppConfig::defaults().merge(stored),
            Err(e) => {
                tracing::warn!(path = %self.path().display(), "ignoring config: {e}");
                AppConfig::defaults()
            }
        }
    }
}
