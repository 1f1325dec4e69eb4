//! User domain models.

use serde::{Deserialize, Serialize};

/// The externally visible session record.
///
/// Never carries credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A persisted credential record.
///
/// `password_hash` is an argon2 PHC string, not the password itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl StoredCredential {
    /// Case-insensitive email comparison.
    pub fn matches_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }

    /// The session record for this credential.
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Canonical form used for email comparisons.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Who is using the application right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl From<Option<User>> for SessionState {
    fn from(user: Option<User>) -> Self {
        user.map_or(Self::Anonymous, Self::Authenticated)
    }
}
