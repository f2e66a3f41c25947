//! Configuration management for the launcher

pub mod schema;

pub use schema::Config;

use crate::error::{LauncherError, LauncherResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("actions-launcher")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file does not exist
    pub async fn load(&self) -> LauncherResult<Config> {
        let exists = fs::try_exists(&self.config_path).await.map_err(|e| {
            LauncherError::io(format!("checking {}", self.config_path.display()), e)
        })?;
        if !exists {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> LauncherResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LauncherError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| LauncherError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.download.base_url, "https://github.com");
    }

    #[tokio::test]
    async fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\nlog_format = \"json\"\n\n[download]\nbase_url = \"http://mirror.internal\"\n",
        )
        .unwrap();

        let config = ConfigManager::with_path(path).load().await.unwrap();
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.download.base_url, "http://mirror.internal");
    }

    #[tokio::test]
    async fn invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[cache\ndir = 1").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, LauncherError::ConfigInvalid { path: ref p, .. } if *p == path));
    }

    #[test]
    fn default_path_is_namespaced() {
        let path = ConfigManager::default_config_path();
        assert!(path.ends_with("actions-launcher/config.toml"));
    }
}
