//! Command implementations.
//!
//! Each command renders its view to a `String`; `main` prints it.

pub mod account;
pub mod auth;
pub mod cart;
pub mod products;

use std::path::PathBuf;

use thiserror::Error;

use shopsphere_storefront::config::ConfigError;
use shopsphere_storefront::error::AppError;
use shopsphere_storefront::services::AuthError;
use shopsphere_storefront::storage::StorageError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The storefront reported an error.
    #[error(transparent)]
    App(#[from] AppError),

    /// A product file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A product file is not a JSON list of products.
    #[error("invalid product file {path}: {source}")]
    InvalidProducts {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        Self::App(err.into())
    }
}

impl From<AuthError> for CliError {
    fn from(err: AuthError) -> Self {
        Self::App(err.into())
    }
}

impl CliError {
    /// Text shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.notification().message,
            other => other.to_string(),
        }
    }
}

/// Result of a command: the rendered view.
pub type CommandResult = Result<String, CliError>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_notification() {
        let err = CliError::from(AppError::Unauthorized);
        assert_eq!(err.user_message(), "Please log in first.");

        let err = CliError::ReadFile {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.user_message(), "failed to read missing.json: not found");
    }
}
