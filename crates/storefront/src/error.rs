//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything the storefront views can
//! fail with, and the transient notification shown to the user for it.
//! Errors are reported once and never retried.

use core::fmt;

use thiserror::Error;

use crate::services::auth::AuthError;
use crate::storage::StorageError;
use crate::stores::UserStoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The view requires a logged-in user.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// The notification shown to the user for this error.
    #[must_use]
    pub fn notification(&self) -> Notification {
        if matches!(
            self,
            Self::Storage(_) | Self::Auth(AuthError::Storage(_) | AuthError::Users(UserStoreError::Storage(_)))
        ) {
            tracing::error!(error = %self, "Storage failure");
        }

        // Don't expose storage details to the user
        let message = match self {
            Self::Storage(_) => "Something went wrong".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidForm(errors) => errors.summary(),
                AuthError::Users(UserStoreError::DuplicateEmail) => {
                    "Email already exists".to_owned()
                }
                AuthError::Users(UserStoreError::DuplicateUsername) => {
                    "Username already exists".to_owned()
                }
                AuthError::Users(UserStoreError::InvalidCredentials) => {
                    "Invalid credentials".to_owned()
                }
                AuthError::AlreadyLoggedIn => "You are already logged in.".to_owned(),
                AuthError::Users(UserStoreError::Storage(_)) | AuthError::Storage(_) => {
                    "Something went wrong".to_owned()
                }
            },
            Self::Unauthorized => "Please log in first.".to_owned(),
            Self::NotFound(what) => format!("{what} not found."),
        };

        Notification::error(message)
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user, the equivalent of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// A success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
