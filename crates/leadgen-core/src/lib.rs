pub mod agent;
pub mod config;
pub mod error;
pub mod history;
pub mod lead;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::LeadgenError;
