//! User domain module.
//!
//! This module contains the authenticated user record, the stored credential
//! record and the authentication service trait.
//!
//! # Module Structure
//!
//! - `model`: User, StoredCredential and SessionState
//! - `service`: AuthService trait
//!
//! # Usage
//!
//! ```ignore
//! use leadgen_core::user::{AuthService, SessionState, User};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{SessionState, StoredCredential, User, normalize_email};
pub use service::AuthService;
