//! Integration tests for `ShopSphere`.
//!
//! These tests drive the storefront library end to end against a real
//! storage file in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopsphere-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login and logout through the auth service
//! - `cart_flow` - Cart operations across reopened storage
//! - `storage_layout` - Reading and writing the persisted JSON layout
//! - `properties` - Property tests for cart invariants

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use shopsphere_core::{Price, ProductId};
use shopsphere_storefront::config::StorefrontConfig;
use shopsphere_storefront::forms::{LoginForm, RegisterForm};
use shopsphere_storefront::models::Product;
use shopsphere_storefront::state::AppState;
use shopsphere_storefront::storage::FileStorage;

/// A storefront backed by a storage file in its own temporary directory.
pub struct TestContext {
    dir: TempDir,
    pub state: AppState<FileStorage>,
}

impl TestContext {
    /// Fresh, empty storefront.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(&dir.path().join("storage.json"));
        Self { dir, state }
    }

    /// Storefront over a storage file with the given raw contents.
    #[must_use]
    pub fn with_file_contents(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, contents).unwrap();
        let state = open_state(&path);
        Self { dir, state }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Drop the in-memory state and reload everything from disk.
    pub fn reopen(&mut self) {
        self.state = open_state(&self.storage_path());
    }

    /// The storage file parsed as a JSON object.
    #[must_use]
    pub fn raw_file(&self) -> serde_json::Value {
        let contents = std::fs::read_to_string(self.storage_path()).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    /// The JSON document stored under `key`, decoded from its string value.
    #[must_use]
    pub fn raw_key(&self, key: &str) -> Option<serde_json::Value> {
        self.raw_file()
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(|value| serde_json::from_str(value).unwrap())
    }

    /// Import the standard test catalog.
    pub fn seed_catalog(&self) {
        self.state.catalog().import(&catalog()).unwrap();
    }

    /// Register (and so log in) a shopper.
    pub fn register(&self, name: &str, email: &str) {
        self.state.auth().register(&register_form(name, email)).unwrap();
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn open_state(path: &Path) -> AppState<FileStorage> {
    let config = StorefrontConfig::default().with_storage_path(path);
    AppState::open(config).unwrap()
}

/// Test password meeting every registration rule.
pub const PASSWORD: &str = "Secret#123";

/// A valid registration form.
#[must_use]
pub fn register_form(name: &str, email: &str) -> RegisterForm {
    RegisterForm {
        name: name.to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        confirm_password: PASSWORD.to_string(),
    }
}

/// A login form.
#[must_use]
pub fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// A catalog product.
#[must_use]
pub fn product(id: u32, title: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        image: format!("https://example.com/{id}.jpg"),
        price: Price::from_cents(cents),
        category: None,
        rating: None,
    }
}

/// The standard test catalog.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        product(1, "Fjallraven Backpack", 999),
        product(2, "Mens Casual Slim Fit T-Shirt", 2230),
        product(3, "Mens Cotton Jacket", 5599),
    ]
}
