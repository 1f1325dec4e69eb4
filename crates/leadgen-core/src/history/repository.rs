//! Search history repository trait.

use async_trait::async_trait;

use super::model::SearchHistoryItem;
use crate::error::Result;

/// Repository for recent searches.
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    /// Returns recent searches, newest first. Unreadable data reads as empty.
    async fn list(&self) -> Vec<SearchHistoryItem>;

    /// Records a search and returns the updated list.
    async fn record(&self, industry: &str, location: &str) -> Result<Vec<SearchHistoryItem>>;

    async fn clear(&self) -> Result<()>;
}
