//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - registration, login and logout over the user and session stores

pub mod auth;

pub use auth::{AuthError, AuthService};
