//! Wiring of services for one CLI invocation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use leadgen_core::config::AppConfig;
use leadgen_core::storage::KeyValueStore;
use leadgen_infrastructure::{
    ConfigService, CredentialStore, JsonFileKeyValueStore, KvSearchHistoryRepository,
};

pub struct AppContext {
    pub config: AppConfig,
    pub auth: CredentialStore,
    pub history: KvSearchHistoryRepository,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let config = config_service
            .load()
            .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

        let store_path = ConfigService::store_path(&config)?;
        tracing::debug!(path = %store_path.display(), "Using key-value store");
        let store: Arc<dyn KeyValueStore> = Arc::new(
            JsonFileKeyValueStore::new(store_path).with_latency(config.auth.simulated_latency()),
        );

        Ok(Self {
            auth: CredentialStore::new(store.clone()),
            history: KvSearchHistoryRepository::new(store),
            config,
        })
    }
}
