//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] nova_storage::StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] nova_navigation::NavigationError),

    #[error("Browser error: {0}")]
    Browser(#[from] nova_browser::BrowserError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
