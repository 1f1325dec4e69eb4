//! Credential store backed by a key-value store.
//!
//! Emulates an authentication backend: the credential list and the active
//! session are JSON values under fixed keys, and login/register wait for the
//! store's simulated latency before completing.

use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use async_trait::async_trait;
use leadgen_core::error::{LeadgenError, Result};
use leadgen_core::storage::{KeyValueStore, SESSION_KEY, USERS_KEY};
use leadgen_core::user::{AuthService, StoredCredential, User, normalize_email};
use uuid::Uuid;

/// [`AuthService`] implementation over a [`KeyValueStore`].
///
/// # Example
///
/// ```ignore
/// use leadgen_infrastructure::{CredentialStore, InMemoryKeyValueStore};
///
/// let auth = CredentialStore::new(Arc::new(InMemoryKeyValueStore::new()));
/// let user = auth.register("Ada", "ada@example.com", "hunter2").await?;
/// ```
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn simulate_latency(&self) {
        let latency = self.store.simulated_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Loads the credential list. An unreadable list reads as empty.
    async fn load_credentials(&self) -> Result<Vec<StoredCredential>> {
        let Some(raw) = self.store.get(USERS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(credentials) => Ok(credentials),
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential list is unreadable, treating it as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save_credentials(&self, credentials: &[StoredCredential]) -> Result<()> {
        let raw = serde_json::to_string(credentials)?;
        self.store.set(USERS_KEY, &raw).await
    }

    async fn start_session(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set(SESSION_KEY, &raw).await
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LeadgenError::internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

#[async_trait]
impl AuthService for CredentialStore {
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.simulate_latency().await;

        let credentials = self.load_credentials().await?;
        let user = credentials
            .iter()
            .find(|c| c.matches_email(email) && verify_password(password, &c.password_hash))
            .map(StoredCredential::to_user)
            .ok_or(LeadgenError::InvalidCredentials)?;

        self.start_session(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        self.simulate_latency().await;

        if normalize_email(email).is_empty() {
            return Err(LeadgenError::config("email must not be empty"));
        }
        if password.is_empty() {
            return Err(LeadgenError::config("password must not be empty"));
        }

        let mut credentials = self.load_credentials().await?;
        if credentials.iter().any(|c| c.matches_email(email)) {
            return Err(LeadgenError::DuplicateUser {
                email: email.trim().to_string(),
            });
        }

        let credential = StoredCredential {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password_hash: hash_password(password)?,
        };
        let user = credential.to_user();

        credentials.push(credential);
        self.save_credentials(&credentials).await?;
        self.start_session(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        self.store.delete(SESSION_KEY).await
    }

    async fn current_user(&self) -> Option<User> {
        let raw = match self.store.get(SESSION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session");
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is unreadable, treating it as logged out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-phc-string"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_simulated_latency() {
        let store = InMemoryKeyValueStore::new().with_latency(std::time::Duration::from_millis(800));
        let auth = CredentialStore::new(Arc::new(store));

        let started = tokio::time::Instant::now();
        let result = auth.login("nobody@example.com", "pw").await;

        assert_eq!(result, Err(LeadgenError::InvalidCredentials));
        assert!(started.elapsed() >= std::time::Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_waits_for_simulated_latency() {
        let store = InMemoryKeyValueStore::new().with_latency(std::time::Duration::from_millis(800));
        let auth = CredentialStore::new(Arc::new(store));

        let started = tokio::time::Instant::now();
        let user = auth.register("Ada", "ada@example.com", "pw").await.unwrap();

        assert!(started.elapsed() >= std::time::Duration::from_millis(800));
        assert_eq!(auth.current_user().await, Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_latency_store_does_not_sleep() {
        let auth = CredentialStore::new(Arc::new(InMemoryKeyValueStore::new()));

        let started = tokio::time::Instant::now();
        auth.register("Ada", "ada@example.com", "pw").await.unwrap();
        auth.login("ada@example.com", "pw").await.unwrap();

        assert_eq!(started.elapsed(), std::time::Duration::ZERO);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_credentials() {
        let auth = CredentialStore::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(auth.register("Ada", "  ", "pw").await.is_err());
        assert!(auth.register("Ada", "ada@example.com", "").await.is_err());
        assert!(auth.current_user().await.is_none());
    }
}
