//! Search engine catalog
//!
//! Static configuration data; the selected engine is the only runtime state
//! and it lives in [`crate::SearchEnginePreference`].

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngineId {
    Brave,
    DuckDuckGo,
    Google,
    Ecosia,
}

pub const DEFAULT_SEARCH_ENGINE: SearchEngineId = SearchEngineId::Brave;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEngine {
    pub id: SearchEngineId,
    pub display_name: &'static str,
    /// Query URL up to and including the `q=` parameter
    pub query_prefix: &'static str,
    pub icon: &'static str,
    /// Brand colour as `#RRGGBB`
    pub brand_color: &'static str,
}

static CATALOG: [SearchEngine; 4] = [
    SearchEngine {
        id: SearchEngineId::Brave,
        display_name: "Brave Search",
        query_prefix: "https://search.brave.com/search?q=",
        icon: "shield-checkmark",
        brand_color: "#FB542B",
    },
    SearchEngine {
        id: SearchEngineId::DuckDuckGo,
        display_name: "DuckDuckGo",
        query_prefix: "https://duckduckgo.com/?q=",
        icon: "search",
        brand_color: "#DE5833",
    },
    SearchEngine {
        id: SearchEngineId::Google,
        display_name: "Google",
        query_prefix: "https://www.google.com/search?q=",
        icon: "logo-google",
        brand_color: "#4285F4",
    },
    SearchEngine {
        id: SearchEngineId::Ecosia,
        display_name: "Ecosia",
        query_prefix: "https://www.ecosia.org/search?q=",
        icon: "leaf",
        brand_color: "#59B368",
    },
];

impl SearchEngineId {
    pub const ALL: [SearchEngineId; 4] = [
        SearchEngineId::Brave,
        SearchEngineId::DuckDuckGo,
        SearchEngineId::Google,
        SearchEngineId::Ecosia,
    ];

    pub fn engine(&self) -> &'static SearchEngine {
        match self {
            SearchEngineId::Brave => &CATALOG[0],
            SearchEngineId::DuckDuckGo => &CATALOG[1],
            SearchEngineId::Google => &CATALOG[2],
            SearchEngineId::Ecosia => &CATALOG[3],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEngineId::Brave => "brave",
            SearchEngineId::DuckDuckGo => "duckduckgo",
            SearchEngineId::Google => "google",
            SearchEngineId::Ecosia => "ecosia",
        }
    }
}

impl Default for SearchEngineId {
    fn default() -> Self {
        DEFAULT_SEARCH_ENGINE
    }
}

impl std::fmt::Display for SearchEngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SearchEngineId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brave" => Ok(SearchEngineId::Brave),
            "duckduckgo" => Ok(SearchEngineId::DuckDuckGo),
            "google" => Ok(SearchEngineId::Google),
            "ecosia" => Ok(SearchEngineId::Ecosia),
            _ => Err(NavigationError::UnknownSearchEngine(s.to_string())),
        }
    }
}

impl SearchEngine {
    /// Build the results URL for an already percent-encoded query
    pub fn search_url(&self, encoded_query: &str) -> String {
        format!("{}{}", self.query_prefix, encoded_query)
    }

    pub fn catalog() -> &'static [SearchEngine] {
        &CATALOG
    }
}
