//! Error types for the leadgen workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for all leadgen crates.
///
/// Authentication failures carry the human-readable message shown to the
/// end user; everything else is plumbing and is formatted for logs.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LeadgenError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (key-value store layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration or input validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login rejected: unknown email or wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Registration rejected: the email is already taken.
    #[error("User with this email already exists.")]
    DuplicateUser { email: String },

    /// The generative search API key is not available to the process.
    #[error("API key is missing: set GEMINI_API_KEY or [gemini] api_key in config.toml")]
    MissingApiKey,

    /// The external model call failed.
    #[error("Upstream error{}: {message}", .status_code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Upstream {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LeadgenError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an Upstream error without an HTTP status.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status_code: None,
            message: message.into(),
            is_retryable: false,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this error is an authentication policy failure.
    ///
    /// These are the only errors meant to be shown to the end user verbatim;
    /// the user recovers by retrying with corrected input.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::DuplicateUser { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LeadgenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LeadgenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LeadgenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LeadgenError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LeadgenError>`.
pub type Result<T> = std::result::Result<T, LeadgenError>;
