//! Platform paths for leadgen files.
//!
//! ```text
//! ~/.config/leadgen/
//! └── config.toml        # Application configuration
//!
//! ~/.local/share/leadgen/
//! └── store.json         # Credentials, session and search history
//! ```

use std::path::PathBuf;

use leadgen_core::error::{LeadgenError, Result};

const APP_DIR: &str = "leadgen";

pub struct LeadgenPaths;

impl LeadgenPaths {
    /// Returns the leadgen configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| LeadgenError::config("Cannot determine config directory"))
    }

    /// Returns the leadgen data directory.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| LeadgenError::config("Cannot determine data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn store_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("store.json"))
    }
}
