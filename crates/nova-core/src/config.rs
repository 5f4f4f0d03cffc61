//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use nova_browser::Viewport;
use nova_navigation::{SearchEngineId, DEFAULT_SEARCH_ENGINE};

use crate::theme::ThemePreference;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the settings database
    pub database_path: PathBuf,
    /// Engine used until the user picks one in settings
    pub default_search_engine: SearchEngineId,
    /// Browser surface geometry
    pub viewport: Viewport,
    pub theme: ThemePreference,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("nova.db"),
            default_search_engine: DEFAULT_SEARCH_ENGINE,
            viewport: Viewport::default(),
            theme: ThemePreference::System,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Nova"))
            .unwrap_or_else(|| PathBuf::from(".nova"))
    }

    /// Read a JSON config file. A missing file yields the defaults; missing
    /// fields take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let v = &self.viewport;
        if v.width <= 0.0 || v.height <= 0.0 {
            return Err(crate::CoreError::Config(format!(
                "viewport must have a positive size, got {}x{}",
                v.width, v.height
            )));
        }
        if v.header_height < 0.0 || v.header_height >= v.height {
            return Err(crate::CoreError::Config(format!(
                "header height {} does not fit a viewport of height {}",
                v.header_height, v.height
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/data"));
        assert_eq!(config.database_path, PathBuf::from("/data/nova.db"));
        assert_eq!(config.default_search_engine, SearchEngineId::Brave);
        assert_eq!(config.theme, ThemePreference::System);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "default_search_engine": "ecosia", "theme": "dark" }"#,
        )
        .unwrap();
        assert_eq!(config.default_search_engine, SearchEngineId::Ecosia);
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.viewport, Viewport::default());
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let err = Config::from_json(
            r#"{ "viewport": { "width": 0, "height": 800, "header_height": 56, "refresh_band_height": 120 } }"#,
        );
        assert!(matches!(err, Err(crate::CoreError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/nova/config.json")).unwrap();
        assert_eq!(config.default_search_engine, DEFAULT_SEARCH_ENGINE);
    }
}
