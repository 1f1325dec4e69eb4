//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` and resolves the Gemini API key,
//! which may come from the environment or from the file.

use std::path::{Path, PathBuf};

use leadgen_core::config::{AppConfig, GeminiConfig};
use leadgen_core::error::{LeadgenError, Result};

use crate::paths::LeadgenPaths;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Loads configuration from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform config file (e.g. `~/.config/leadgen/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(LeadgenPaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration. A missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The key-value store file: `[storage] path` or the platform default.
    pub fn store_path(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.path {
            Some(path) => Ok(path.clone()),
            None => LeadgenPaths::store_file(),
        }
    }
}

/// Resolves the API key from the process environment, then the config.
pub fn resolve_api_key(config: &GeminiConfig) -> Result<String> {
    resolve_api_key_with(config, |name| std::env::var(name).ok())
}

/// Resolves the API key using `lookup` for environment variables.
///
/// Blank values are ignored. Fails with `MissingApiKey` when no source has one.
pub fn resolve_api_key_with<F>(config: &GeminiConfig, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .chain(config.api_key.clone())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or(LeadgenError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[gemini]\nmodel = \"gemini-2.5-pro\"\n\n[search]\ndefault_count = 25\n",
        )
        .unwrap();

        let config = ConfigService::with_path(path).load().unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.search.default_count, 25);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[gemini\nmodel = ").unwrap();

        let err = ConfigService::with_path(path).load().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_store_path_override() {
        let mut config = AppConfig::default();
        config.storage.path = Some(PathBuf::from("/tmp/custom.json"));
        assert_eq!(
            ConfigService::store_path(&config).unwrap(),
            PathBuf::from("/tmp/custom.json")
        );
    }

    #[test]
    fn test_api_key_precedence() {
        let config = GeminiConfig {
            api_key: Some("from-file".to_string()),
            ..GeminiConfig::default()
        };

        let key = resolve_api_key_with(&config, |name| {
            (name == "API_KEY").then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(key, "from-env");

        let key = resolve_api_key_with(&config, |name| {
            (name == "GEMINI_API_KEY").then(|| "   ".to_string())
        })
        .unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_api_key_missing() {
        let err = resolve_api_key_with(&GeminiConfig::default(), |_| None).unwrap_err();
        assert_eq!(err, LeadgenError::MissingApiKey);
    }
}
