//! Key-value storage port.
//!
//! Credentials, the active session and search history are all persisted as
//! JSON strings under fixed keys. Backends live in the infrastructure crate.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Key holding the JSON list of stored credentials.
pub const USERS_KEY: &str = "leadgen_users";
/// Key holding the JSON-encoded active session.
pub const SESSION_KEY: &str = "leadgen_session";
/// Key holding the JSON list of recent searches.
pub const SEARCH_HISTORY_KEY: &str = "leadgen_search_history";

/// A string-to-string store with whole-value reads and writes.
///
/// There are no transactions: callers read, modify and write back, and the
/// last writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Latency that services built on this store should simulate before
    /// completing a round trip. Zero means none.
    fn simulated_latency(&self) -> Duration {
        Duration::ZERO
    }
}
