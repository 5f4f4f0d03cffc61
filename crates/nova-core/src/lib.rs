//! Nova Core
//!
//! Application shell for the Nova browser: home screen, settings, scanner
//! and external links feeding one in-app browser session.

mod app;
mod config;
mod error;
mod permissions;
mod theme;

pub use app::{App, SearchEngineOption};
pub use config::Config;
pub use error::CoreError;
pub use permissions::{PermissionManager, PermissionPrompt, PermissionState, PermissionType};
pub use theme::{ColorScheme, Palette, Subscription, ThemePreference, ThemeProvider};

// Re-export core components
pub use nova_browser::{
    BrowserError, BrowserSession, ChromeSnapshot, NavigationState, NavigationType, Platform,
    PlatformError, Renderer, RendererEvent, SessionState, TouchEvent, Viewport,
};
pub use nova_navigation::{
    format_url, DeepLinkSource, NavigationError, SearchEngine, SearchEngineId, UrlFormatter,
};
pub use nova_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
