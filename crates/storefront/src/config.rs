//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPSPHERE_STORAGE_PATH` - Storage file (default: shopsphere-storage.json)
//! - `SHOPSPHERE_STORE_NAME` - Store title shown in views (default: `ShopSphere`)
//! - `SHOPSPHERE_GUEST_NAME` - Name shown when nobody is known (default: Guest)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = "shopsphere-storage.json";
const DEFAULT_STORE_NAME: &str = "ShopSphere";
const DEFAULT_GUEST_NAME: &str = "Guest";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// File backing the storefront's storage
    pub storage_path: PathBuf,
    /// Store title
    pub store_name: String,
    /// Display-name fallback for unknown users
    pub guest_name: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            store_name: DEFAULT_STORE_NAME.to_string(),
            guest_name: DEFAULT_GUEST_NAME.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path =
            get_env_or_default(&lookup, "SHOPSPHERE_STORAGE_PATH", DEFAULT_STORAGE_PATH)?;
        let store_name = get_env_or_default(&lookup, "SHOPSPHERE_STORE_NAME", DEFAULT_STORE_NAME)?;
        let guest_name = get_env_or_default(&lookup, "SHOPSPHERE_GUEST_NAME", DEFAULT_GUEST_NAME)?;

        Ok(Self {
            storage_path: PathBuf::from(storage_path),
            store_name,
            guest_name,
        })
    }

    /// Replace the storage path, e.g. from a command-line flag.
    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

/// Get a variable with a default value. A variable that is set must not be
/// blank.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be blank".to_string(),
        )),
        Some(value) => Ok(value),
    }
}
