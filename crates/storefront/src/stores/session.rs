//! The logged-in user, persisted under the `user` key.
//!
//! There is at most one session. It has no expiry: it lasts until
//! [`SessionStore::logout`] or until the storage is cleared externally.

use tracing::instrument;

use crate::error::AppError;
use crate::models::User;
use crate::storage::{Storage, StorageError, keys, read_json, write_json};

/// Repository for the active session.
pub struct SessionStore<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: Storage + ?Sized> SessionStore<'a, S> {
    /// Create a session store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current(&self) -> Option<User> {
        read_json(self.storage, keys::SESSION_USER)
    }

    /// Whether a user is logged in.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }

    /// The logged-in user, for views that require one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when nobody is logged in.
    pub fn require_user(&self) -> Result<User, AppError> {
        self.current().ok_or(AppError::Unauthorized)
    }

    /// Start a session for `user` and remember their display name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be written.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn login(&self, user: &User) -> Result<(), StorageError> {
        write_json(self.storage, keys::SESSION_USER, user)?;
        self.storage.set_item(keys::USERNAME, &user.name)?;
        tracing::info!("Session started");
        Ok(())
    }

    /// End the session. The remembered display name is kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove_item(keys::SESSION_USER)?;
        tracing::info!("Session ended");
        Ok(())
    }

    /// Name to greet the user by: the remembered display name, else the
    /// session user's name, else `guest`.
    #[must_use]
    pub fn display_name(&self, guest: &str) -> String {
        let remembered = match self.storage.get_item(keys::USERNAME) {
            Ok(name) => name.filter(|n| !n.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read display name");
                None
            }
        };

        remembered
            .or_else(|| self.current().map(|u| u.name))
            .unwrap_or_else(|| guest.to_owned())
    }
}
