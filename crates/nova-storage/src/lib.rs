//! Nova Storage Layer
//!
//! SQLite-backed key/value settings. The browser core keeps no history
//! across restarts; only user preferences live here.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
