//! ShopSphere Core - Shared types library.
//!
//! This crate provides the value types used across all ShopSphere components:
//! - `storefront` - Local-storage backed user, session, cart and catalog stores
//! - `cli` - Command-line view layer driving the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
