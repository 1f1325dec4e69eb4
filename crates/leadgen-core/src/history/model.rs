//! Search history model and list rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of searches kept.
pub const MAX_HISTORY_ITEMS: usize = 5;

/// One past search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHistoryItem {
    pub industry: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryItem {
    pub fn new(industry: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            location: location.into(),
            timestamp: Utc::now(),
        }
    }

    /// Case-insensitive match on (industry, location).
    pub fn same_search(&self, other: &Self) -> bool {
        self.industry.trim().to_lowercase() == other.industry.trim().to_lowercase()
            && self.location.trim().to_lowercase() == other.location.trim().to_lowercase()
    }
}

/// Puts `item` at the front of `history` (newest first).
///
/// An existing entry for the same search is removed, and the list is capped
/// at [`MAX_HISTORY_ITEMS`].
pub fn push_history(history: &mut Vec<SearchHistoryItem>, item: SearchHistoryItem) {
    history.retain(|existing| !existing.same_search(&item));
    history.insert(0, item);
    history.truncate(MAX_HISTORY_ITEMS);
}
