//! Search history persisted in a key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use leadgen_core::error::Result;
use leadgen_core::history::{SearchHistoryItem, SearchHistoryRepository, push_history};
use leadgen_core::storage::{KeyValueStore, SEARCH_HISTORY_KEY};

/// [`SearchHistoryRepository`] storing the list as JSON under a fixed key.
#[derive(Clone)]
pub struct KvSearchHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSearchHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchHistoryRepository for KvSearchHistoryRepository {
    async fn list(&self) -> Vec<SearchHistoryItem> {
        let raw = match self.store.get(SEARCH_HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read search history");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Search history is unreadable, treating it as empty");
            Vec::new()
        })
    }

    async fn record(&self, industry: &str, location: &str) -> Result<Vec<SearchHistoryItem>> {
        let mut history = self.list().await;
        push_history(&mut history, SearchHistoryItem::new(industry, location));

        let raw = serde_json::to_string(&history)?;
        self.store.set(SEARCH_HISTORY_KEY, &raw).await?;
        Ok(history)
    }

    async fn clear(&self) -> Result<()> {
        self.store.delete(SEARCH_HISTORY_KEY).await
    }
}
