//! Search history domain module.

mod model;
mod repository;

pub use model::{MAX_HISTORY_ITEMS, SearchHistoryItem, push_history};
pub use repository::SearchHistoryRepository;
