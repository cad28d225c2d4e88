//! Authentication error types.

use thiserror::Error;

use crate::forms::FormErrors;
use crate::storage::StorageError;
use crate::stores::UserStoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted form failed validation.
    #[error("invalid form: {0}")]
    InvalidForm(#[from] FormErrors),

    /// Registration clash or wrong credentials.
    #[error(transparent)]
    Users(#[from] UserStoreError),

    /// A user is already logged in.
    #[error("already logged in")]
    AlreadyLoggedIn,

    /// The session could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
