//! Application state shared across views.

use std::rc::Rc;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::models::User;
use crate::services::AuthService;
use crate::storage::{FileStorage, Storage, StorageError};
use crate::stores::{CartStore, ProductCatalog, SessionStore, UserStore};

/// Application state shared across all views.
///
/// Cheaply cloneable via `Rc`. Every store handed out borrows the same
/// storage backend, so they all see each other's writes.
pub struct AppState<S> {
    inner: Rc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    config: StorefrontConfig,
    storage: S,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl AppState<FileStorage> {
    /// Open the storage file named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or parsed.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.storage_path)?;
        Ok(Self::new(config, storage))
    }
}

impl<S: Storage> AppState<S> {
    /// Create a new application state over `storage`.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: S) -> Self {
        Self {
            inner: Rc::new(AppStateInner { config, storage }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Registered users.
    #[must_use]
    pub fn users(&self) -> UserStore<'_, S> {
        UserStore::new(self.storage())
    }

    /// The active session.
    #[must_use]
    pub fn session(&self) -> SessionStore<'_, S> {
        SessionStore::new(self.storage())
    }

    /// User carts.
    #[must_use]
    pub fn carts(&self) -> CartStore<'_, S> {
        CartStore::new(self.storage())
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> ProductCatalog<'_, S> {
        ProductCatalog::new(self.storage())
    }

    /// Registration, login and logout.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_, S> {
        AuthService::new(self.storage())
    }

    /// The logged-in user, for protected views.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when nobody is logged in.
    pub fn require_user(&self) -> Result<User, AppError> {
        self.session().require_user()
    }

    /// Name to greet the current visitor by.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.session().display_name(&self.inner.config.guest_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::forms::RegisterForm;
    use crate::storage::MemoryStorage;

    fn state() -> AppState<MemoryStorage> {
        AppState::new(StorefrontConfig::default(), MemoryStorage::new())
    }

    #[test]
    fn test_stores_share_storage() {
        let state = state();
        assert_eq!(state.display_name(), "Guest");
        assert!(matches!(state.require_user(), Err(AppError::Unauthorized)));

        state
            .auth()
            .register(&RegisterForm {
                name: "shopper".to_string(),
                email: "shopper@example.com".to_string(),
                password: "Secret#123".to_string(),
                confirm_password: "Secret#123".to_string(),
            })
            .unwrap();

        let cloned = state.clone();
        assert_eq!(cloned.require_user().unwrap().name, "shopper");
        assert_eq!(cloned.users().all().len(), 1);
        assert_eq!(cloned.display_name(), "shopper");
    }

    #[test]
    fn test_open_file_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::default().with_storage_path(dir.path().join("store.json"));

        let state = AppState::open(config).unwrap();
        assert!(state.catalog().all().is_empty());
        assert_eq!(state.storage().path(), dir.path().join("store.json"));
    }
}
