//! Domain models for the storefront.
//!
//! These are the exact shapes persisted under the storage keys, so field
//! names follow the stored JSON rather than Rust conventions where the two
//! differ (`Products` on cart records).

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{CartItem, CartRecord, QuantityAdjustment};
pub use product::{Product, Rating};
pub use user::{User, UserIdentity};
