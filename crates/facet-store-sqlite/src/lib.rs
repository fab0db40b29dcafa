//! SQLite backend for the Facet metadata store.
//!
//! Owns a single [`rusqlite::Connection`] per store handle. Every connection
//! gets the distinct-value `group_concat` aggregate registered, so grouped
//! queries drop duplicate values while keeping their first-seen order.

pub mod aggregate;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{STORE_FILE, SqliteStore, store_path};
