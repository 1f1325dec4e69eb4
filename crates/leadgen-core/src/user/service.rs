//! Authentication service trait.

use async_trait::async_trait;

use super::model::{SessionState, User};
use crate::error::Result;

/// Service for logging users in and out.
///
/// Implementations keep at most one active session. A second login simply
/// replaces the first.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates an existing user and makes them the active session.
    ///
    /// # Errors
    ///
    /// `LeadgenError::InvalidCredentials` when no record matches; the active
    /// session is left untouched in that case.
    async fn login(&self, email: &str, password: &str) -> Result<User>;

    /// Creates a new user and makes them the active session.
    ///
    /// # Errors
    ///
    /// `LeadgenError::DuplicateUser` when the email is already registered
    /// (compared case-insensitively).
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;

    /// Clears the active session. Idempotent.
    async fn logout(&self) -> Result<()>;

    /// Returns the active session, or `None` when there is none or the
    /// stored value is unreadable.
    async fn current_user(&self) -> Option<User>;

    /// The session state derived from persisted data.
    async fn session_state(&self) -> SessionState {
        self.current_user().await.into()
    }
}
