//! Registered users, persisted under the `users` key.
//!
//! Entries that fail to decode are skipped on read and written back
//! unchanged on registration.

use thiserror::Error;
use tracing::instrument;

use crate::models::User;
use crate::storage::{JsonList, Storage, StorageError, keys, read_json_list, write_json};

/// Errors from user registration and authentication.
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// Another user already has this email.
    #[error("email already exists")]
    DuplicateEmail,

    /// Another user already has this name.
    #[error("username already exists")]
    DuplicateUsername,

    /// No user has this exact email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user list could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Repository for registered users.
pub struct UserStore<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: Storage + ?Sized> UserStore<'a, S> {
    /// Create a user store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    fn load(&self) -> JsonList<User> {
        read_json_list(self.storage, keys::USERS)
    }

    /// All registered users, in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        self.load().into_records()
    }

    /// Find a user by exact email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.all().into_iter().find(|u| u.email == *email)
    }

    /// Register a new user.
    ///
    /// The first existing user whose email or name matches decides the
    /// error: `DuplicateEmail` if its email matches, otherwise
    /// `DuplicateUsername`.
    ///
    /// # Errors
    ///
    /// Returns `UserStoreError::DuplicateEmail` or
    /// `UserStoreError::DuplicateUsername` on a clash, or
    /// `UserStoreError::Storage` if the list cannot be saved.
    #[instrument(skip(self, candidate), fields(email = %candidate.email))]
    pub fn register(&self, candidate: User) -> Result<User, UserStoreError> {
        let mut users = self.load();

        if let Some(existing) = users
            .records()
            .find(|u| u.email == candidate.email || u.name == candidate.name)
        {
            let err = if existing.email == candidate.email {
                UserStoreError::DuplicateEmail
            } else {
                UserStoreError::DuplicateUsername
            };
            tracing::info!(error = %err, "Registration rejected");
            return Err(err);
        }

        users.push(candidate.clone());
        write_json(self.storage, keys::USERS, &users)?;

        tracing::info!(total_users = users.len(), "User registered");
        Ok(candidate)
    }

    /// Find the user with exactly this email and password.
    ///
    /// # Errors
    ///
    /// Returns `UserStoreError::InvalidCredentials` if no user matches both.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, UserStoreError> {
        self.all()
            .into_iter()
            .find(|u| u.email == *email && u.password_matches(password))
            .ok_or(UserStoreError::InvalidCredentials)
    }
}
