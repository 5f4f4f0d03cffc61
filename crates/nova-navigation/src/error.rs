//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Unknown search engine: {0}")]
    UnknownSearchEngine(String),

    #[error("Storage error: {0}")]
    Storage(#[from] nova_storage::StorageError),
}
