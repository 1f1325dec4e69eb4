//! Application configuration model (`config.toml`).

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lead::DEFAULT_LEAD_COUNT;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 800;

/// Root of `config.toml`. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variables take precedence over this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "default_count")]
    pub default_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
        }
    }
}

fn default_count() -> usize {
    DEFAULT_LEAD_COUNT
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Delay applied to login and register.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
        }
    }
}

impl AuthConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

fn default_latency_ms() -> u64 {
    DEFAULT_SIMULATED_LATENCY_MS
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Location of the key-value store file. Defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.search.default_count, DEFAULT_LEAD_COUNT);
        assert_eq!(config.auth.simulated_latency(), Duration::from_millis(800));
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
[gemini]
api_key = "abc"

[auth]
simulated_latency_ms = 0

[storage]
path = "/tmp/leadgen.json"
"#,
        )
        .unwrap();

        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini.api_key.as_deref(), Some("abc"));
        assert_eq!(config.auth.simulated_latency(), Duration::ZERO);
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/tmp/leadgen.json"))
        );
    }
}
