//! `ShopSphere` storefront library.
//!
//! Users, the login session, per-user carts and the product catalog, all
//! persisted as JSON documents in a string-keyed [`storage::Storage`]. Views
//! (the `shopsphere` CLI) reach the stores through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;
