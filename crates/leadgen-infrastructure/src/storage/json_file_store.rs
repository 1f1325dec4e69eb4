//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leadgen_core::error::{LeadgenError, Result};
use leadgen_core::storage::KeyValueStore;

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};

type Entries = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted as a single JSON object file.
///
/// Every key maps to a string value. A missing or unreadable file reads as
/// an empty store; the next write replaces it.
#[derive(Clone)]
pub struct JsonFileKeyValueStore {
    file: Arc<AtomicJsonFile<Entries>>,
    latency: Duration,
}

impl JsonFileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn load_entries(&self) -> Result<Entries> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| LeadgenError::internal(format!("Failed to join task: {}", e)))?;

        match loaded {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(AtomicJsonError::Json(e)) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "Store file is unreadable, treating it as empty"
                );
                Ok(Entries::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_entries<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries) + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.update(Entries::new(), f))
            .await
            .map_err(|e| LeadgenError::internal(format!("Failed to join task: {}", e)))??;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.update_entries(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.update_entries(move |entries| {
            entries.remove(&key);
        })
        .await
    }

    fn simulated_latency(&self) -> Duration {
        self.latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        let store = JsonFileKeyValueStore::new(path.clone());
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.delete("a").await.unwrap();

        let reopened = JsonFileKeyValueStore::new(path);
        assert_eq!(reopened.get("a").await.unwrap(), None);
        assert_eq!(reopened.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_corrupted_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonFileKeyValueStore::new(path);
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
    }
}
