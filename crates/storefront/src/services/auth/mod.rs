//! Authentication service.
//!
//! Ties form validation, the user store and the session together: a
//! successful registration or login starts a session, logout ends it.

mod error;

pub use error::AuthError;

use tracing::instrument;

use crate::forms::{LoginForm, RegisterForm};
use crate::models::User;
use crate::storage::Storage;
use crate::stores::{SessionStore, UserStore};

/// Authentication service.
pub struct AuthService<'a, S: ?Sized> {
    users: UserStore<'a, S>,
    session: SessionStore<'a, S>,
}

impl<'a, S: Storage + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self {
            users: UserStore::new(storage),
            session: SessionStore::new(storage),
        }
    }

    /// Validate and register a new user, then log them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyLoggedIn` if a session is active,
    /// `AuthError::InvalidForm` if validation fails, or
    /// `AuthError::Users` if the email or name is taken.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn register(&self, form: &RegisterForm) -> Result<User, AuthError> {
        self.ensure_logged_out()?;

        let candidate = form.validate()?;
        let user = self.users.register(candidate)?;
        self.session.login(&user)?;

        Ok(user)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyLoggedIn` if a session is active,
    /// `AuthError::InvalidForm` if a field is empty, or
    /// `AuthError::Users` with `InvalidCredentials` if no user matches.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        self.ensure_logged_out()?;
        form.validate()?;

        let user = self
            .users
            .authenticate(&form.email, &form.password)
            .inspect_err(|_| tracing::info!("Login rejected"))?;
        self.session.login(&user)?;

        Ok(user)
    }

    /// End the current session. Logging out without a session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.logout()?;
        Ok(())
    }

    fn ensure_logged_out(&self) -> Result<(), AuthError> {
        if self.session.is_active() {
            return Err(AuthError::AlreadyLoggedIn);
        }
        Ok(())
    }
}
