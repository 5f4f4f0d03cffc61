//! Nova Navigation
//!
//! Address input handling for the home screen:
//! 1. URL-like input → normalised `https://` URL
//! 2. Anything else → search URL for the selected engine
//!
//! Also owns the static search-engine catalog, the persisted default-engine
//! preference and the filter applied to externally opened links.

mod deep_link;
mod engine;
mod error;
mod input;
mod preference;

pub use deep_link::{accept_external_url, DeepLinkSource};
pub use engine::{SearchEngine, SearchEngineId, DEFAULT_SEARCH_ENGINE};
pub use error::NavigationError;
pub use input::{format_url, is_url, InputResolution, UrlFormatter};
pub use preference::{SearchEnginePreference, STORAGE_KEY_SEARCH_ENGINE};

pub type Result<T> = std::result::Result<T, NavigationError>;
