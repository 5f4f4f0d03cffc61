//! Browser session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Cannot open an empty URL")]
    EmptyUrl,
}

/// Failures reported by the host platform for outward-facing actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Action cancelled by the user")]
    Cancelled,

    #[error("Platform action failed: {0}")]
    Failed(String),
}
