pub mod config_service;
pub mod credential_store;
pub mod paths;
pub mod search_history;
pub mod storage;

pub use crate::config_service::{ConfigService, resolve_api_key};
pub use crate::credential_store::CredentialStore;
pub use crate::search_history::KvSearchHistoryRepository;
pub use crate::storage::{InMemoryKeyValueStore, JsonFileKeyValueStore};
