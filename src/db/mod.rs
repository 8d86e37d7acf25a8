//! Local favorites storage.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for the favorites table (SQLite)
//! - `store.rs`: the store itself, and the trait the favorites repository talks to
//! - `config.rs`: `[storage]` section of the config file

pub(crate) mod config;
pub(crate) mod schema;
pub(crate) mod store;

pub use schema::SQLITE_INIT;
pub use store::{FavoritesStore, SqliteFavoritesStore};
