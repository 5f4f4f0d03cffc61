//! Application shell state container
//!
//! Owns the home screen input, the selected search engine, the QR scanner
//! entry point and the single browser session that every entry point
//! (home submit, scanned code, external link) opens.

use nova_browser::{BrowserSession, Platform, Renderer};
use nova_navigation::{
    accept_external_url, DeepLinkSource, SearchEngine, SearchEngineId, SearchEnginePreference,
    UrlFormatter,
};
use nova_storage::Database;
use serde::Serialize;

use crate::config::Config;
use crate::permissions::{PermissionManager, PermissionPrompt, PermissionType};
use crate::theme::{ColorScheme, ThemeProvider};
use crate::Result;

/// One row of the settings screen
#[derive(Debug, Clone, Serialize)]
pub struct SearchEngineOption {
    pub engine: &'static SearchEngine,
    pub selected: bool,
}

pub struct App<R: Renderer, P: Platform> {
    config: Config,
    db: Database,
    preference: SearchEnginePreference,
    formatter: UrlFormatter,
    browser: BrowserSession<R, P>,
    theme: ThemeProvider,
    permissions: PermissionManager,
    home_input: String,
    scanner_open: bool,
    shut_down: bool,
}

impl<R: Renderer, P: Platform> App<R, P> {
    /// Open the settings database at the configured path and build the shell
    pub fn new(config: Config, renderer: R, platform: P, system_scheme: ColorScheme) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db, renderer, platform, system_scheme))
    }

    pub fn with_database(
        config: Config,
        db: Database,
        renderer: R,
        platform: P,
        system_scheme: ColorScheme,
    ) -> Self {
        let preference = SearchEnginePreference::new(db.clone());
        let engine = preference.load_or(config.default_search_engine);
        let browser = BrowserSession::new(renderer, platform, config.viewport);
        let theme = ThemeProvider::new(config.theme, system_scheme);

        tracing::info!(engine = %engine, "Nova shell initialized");

        Self {
            config,
            db,
            preference,
            formatter: UrlFormatter::with_search_engine(engine),
            browser,
            theme,
            permissions: PermissionManager::new(),
            home_input: String::new(),
            scanner_open: false,
            shut_down: false,
        }
    }

    // === Home screen ===

    pub fn home_input(&self) -> &str {
        &self.home_input
    }

    pub fn set_home_input(&mut self, text: impl Into<String>) {
        self.home_input = text.into();
    }

    /// Go button or keyboard submit. Blank input does nothing; otherwise the
    /// formatted URL opens in the browser and the input is cleared.
    pub fn submit_home_input(&mut self) -> Result<bool> {
        let Some(url) = self.formatter.resolve(&self.home_input).into_url() else {
            return Ok(false);
        };
        self.browser.open(&url)?;
        self.home_input.clear();
        Ok(true)
    }

    // === Settings ===

    pub fn search_engine(&self) -> SearchEngineId {
        self.formatter.search_engine()
    }

    pub fn search_engine_options(&self) -> Vec<SearchEngineOption> {
        let selected = self.search_engine();
        SearchEngine::catalog()
            .iter()
            .map(|engine| SearchEngineOption {
                engine,
                selected: engine.id == selected,
            })
            .collect()
    }

    /// Takes effect for the next formatted input even if persisting fails
    pub fn select_search_engine(&mut self, engine: SearchEngineId) -> Result<()> {
        self.formatter.set_search_engine(engine);
        self.preference.save(engine)?;
        Ok(())
    }

    // === QR scanner ===

    /// Show the scanner if the camera may be used. A denied permission
    /// leaves the scanner closed and returns false.
    pub fn open_scanner(&mut self, prompt: &mut dyn PermissionPrompt) -> bool {
        if !self.permissions.ensure(PermissionType::Camera, prompt) {
            return false;
        }
        self.scanner_open = true;
        true
    }

    pub fn close_scanner(&mut self) {
        self.scanner_open = false;
    }

    pub fn is_scanner_open(&self) -> bool {
        self.scanner_open
    }

    /// A code was read. The scanner closes and the payload opens like typed
    /// input. Codes arriving after the scanner closed are dropped.
    pub fn handle_scanned_code(&mut self, data: &str) -> Result<bool> {
        if !self.scanner_open {
            tracing::debug!("Ignoring code scanned after scanner closed");
            return Ok(false);
        }
        self.scanner_open = false;

        let Some(url) = self.formatter.resolve(data).into_url() else {
            return Ok(false);
        };
        self.browser.open(&url)?;
        Ok(true)
    }

    // === External links ===

    /// Open a link handed over by another app. Non-web schemes, links that
    /// arrive after shutdown and links that arrive while a page is already
    /// presented are ignored.
    pub fn handle_deep_link(&mut self, source: DeepLinkSource, raw: &str) -> bool {
        if self.shut_down {
            tracing::debug!(?source, "Ignoring external link after shutdown");
            return false;
        }
        let Some(url) = accept_external_url(raw) else {
            return false;
        };

        match self.browser.open(&url) {
            Ok(()) => {
                tracing::info!(?source, url = %url, "Opened external link");
                true
            }
            Err(e) => {
                tracing::warn!(?source, url = %url, "Could not open external link: {}", e);
                false
            }
        }
    }

    /// Stop accepting external events
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.scanner_open = false;
        tracing::info!("Nova shell shut down");
    }

    // === Accessors ===

    pub fn browser(&self) -> &BrowserSession<R, P> {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut BrowserSession<R, P> {
        &mut self.browser
    }

    pub fn theme(&self) -> &ThemeProvider {
        &self.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
