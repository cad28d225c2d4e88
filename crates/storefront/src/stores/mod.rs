//! Repositories over the storage backend.
//!
//! Each store owns one storage key and exposes per-record operations:
//!
//! - [`UserStore`] - `users`: registration and credential lookup
//! - [`SessionStore`] - `user` and `username`: the logged-in user
//! - [`CartStore`] - `carts`: one cart per user, keyed by email
//! - [`ProductCatalog`] - `products`: the product listing
//!
//! Every mutation reads the whole collection under its key, changes one
//! record and writes the whole collection back.

pub mod carts;
pub mod catalog;
pub mod session;
pub mod users;

pub use carts::{CartStore, total_cost};
pub use catalog::ProductCatalog;
pub use session::SessionStore;
pub use users::{UserStore, UserStoreError};
