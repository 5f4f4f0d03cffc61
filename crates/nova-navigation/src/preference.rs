//! Persisted default search engine

use nova_storage::Database;

use crate::engine::{SearchEngineId, DEFAULT_SEARCH_ENGINE};
use crate::Result;

pub const STORAGE_KEY_SEARCH_ENGINE: &str = "@nova_search_engine";

pub struct SearchEnginePreference {
    db: Database,
}

impl SearchEnginePreference {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the saved engine. Absent, unknown or unreadable values fall back
    /// to the default engine.
    pub fn load(&self) -> SearchEngineId {
        self.load_or(DEFAULT_SEARCH_ENGINE)
    }

    pub fn load_or(&self, fallback: SearchEngineId) -> SearchEngineId {
        match self.db.get_setting(STORAGE_KEY_SEARCH_ENGINE) {
            Ok(Some(saved)) => match saved.parse() {
                Ok(engine) => engine,
                Err(e) => {
                    tracing::warn!(value = %saved, "Ignoring stored search engine: {}", e);
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!("Failed to load search engine preference: {}", e);
                fallback
            }
        }
    }

    pub fn save(&self, engine: SearchEngineId) -> Result<()> {
        self.db.set_setting(STORAGE_KEY_SEARCH_ENGINE, engine.as_str())?;
        tracing::info!(engine = %engine, "Saved search engine preference");
        Ok(())
    }
}

impl Clone for SearchEnginePreference {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
