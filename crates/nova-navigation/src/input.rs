//! Address input formatting
//!
//! Free text typed on the home screen (or decoded from a QR code) is either a
//! URL or a search query:
//! 1. Starts with `http://` / `https://` → navigate as-is
//! 2. Contains a dot and no whitespace → navigate, prefixing `https://`
//! 3. Anything else → search with the selected engine
//!
//! Both functions are total: no input makes them fail.

use crate::engine::SearchEngineId;

/// Result of resolving address input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    /// Blank input; nothing to open
    Empty,
    /// Navigate to a URL
    Navigate(String),
    /// Search results URL for a free-text query
    Search(String),
}

impl InputResolution {
    /// The URL to hand to the renderer, if any
    pub fn into_url(self) -> Option<String> {
        match self {
            InputResolution::Empty => None,
            InputResolution::Navigate(url) | InputResolution::Search(url) => Some(url),
        }
    }
}

/// Formats address input against a selected search engine
#[derive(Debug, Clone, Default)]
pub struct UrlFormatter {
    engine: SearchEngineId,
}

impl UrlFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_engine(engine: SearchEngineId) -> Self {
        Self { engine }
    }

    pub fn set_search_engine(&mut self, engine: SearchEngineId) {
        self.engine = engine;
    }

    pub fn search_engine(&self) -> SearchEngineId {
        self.engine
    }

    /// Resolve user input into an action
    pub fn resolve(&self, input: &str) -> InputResolution {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return InputResolution::Empty;
        }

        if is_url(trimmed) {
            return InputResolution::Navigate(with_scheme(trimmed));
        }

        let encoded = encode_uri_component(trimmed);
        InputResolution::Search(self.engine.engine().search_url(&encoded))
    }

    pub fn format(&self, input: &str) -> String {
        self.resolve(input).into_url().unwrap_or_default()
    }
}

fn has_scheme(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn with_scheme(input: &str) -> String {
    if has_scheme(input) {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Heuristic URL check: explicit http(s) scheme, or a dot with no whitespace.
pub fn is_url(input: &str) -> bool {
    if has_scheme(input) {
        return true;
    }

    input.contains('.') && !input.chars().any(char::is_whitespace)
}

/// Normalise input into a fully-qualified URL (see module docs). Blank input
/// yields an empty string.
pub fn format_url(input: &str, engine: SearchEngineId) -> String {
    UrlFormatter::with_search_engine(engine).format(input)
}

/// Percent-encode like JavaScript's `encodeURIComponent`
fn encode_uri_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => result.push(byte as char),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com"));
        assert!(is_url("example.com"));
        assert!(is_url("subdomain.example.com"));

        assert!(!is_url("example com"));
        assert!(!is_url("hello world"));
        assert!(!is_url("example"));
        assert!(!is_url(""));
        assert!(!is_url("example.com\tpath"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_url("", SearchEngineId::Brave), "");
        assert_eq!(format_url("   ", SearchEngineId::Brave), "");
        assert_eq!(UrlFormatter::new().resolve("  \n"), InputResolution::Empty);
    }

    #[test]
    fn test_format_urls() {
        let formatter = UrlFormatter::new();
        assert_eq!(formatter.format("example.com"), "https://example.com");
        assert_eq!(formatter.format("  example.com  "), "https://example.com");
        assert_eq!(formatter.format("http://example.com"), "http://example.com");
        assert_eq!(formatter.format("https://example.com"), "https://example.com");
        assert_eq!(formatter.format("nova.app"), "https://nova.app");
    }

    #[test]
    fn test_format_search() {
        assert_eq!(
            format_url("hello world", SearchEngineId::DuckDuckGo),
            "https://duckduckgo.com/?q=hello%20world"
        );
        assert_eq!(
            UrlFormatter::new().format("hello world"),
            "https://search.brave.com/search?q=hello%20world"
        );
        assert_eq!(
            format_url("example", SearchEngineId::Google),
            "https://www.google.com/search?q=example"
        );
    }

    #[test]
    fn test_search_encoding() {
        assert_eq!(
            UrlFormatter::new().format("test@#$%"),
            "https://search.brave.com/search?q=test%40%23%24%25"
        );
        assert_eq!(
            format_url("café (ok)", SearchEngineId::Ecosia),
            "https://www.ecosia.org/search?q=caf%C3%A9%20(ok)"
        );
    }

    #[test]
    fn test_engine_switch() {
        let mut formatter = UrlFormatter::new();
        formatter.set_search_engine(SearchEngineId::DuckDuckGo);
        match formatter.resolve("rust lang") {
            InputResolution::Search(url) => assert!(url.starts_with("https://duckduckgo.com/")),
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn dotted_without_whitespace_is_url(s in "[a-z0-9/:?=-]{0,12}\\.[a-z0-9/:?=.-]{0,12}") {
            prop_assert!(is_url(&s));
        }

        #[test]
        fn whitespace_without_scheme_is_not_url(a in "[a-z.]{0,10}", b in "[a-z.]{0,10}") {
            let input = format!("{} {}", a, b);
            prop_assert!(!is_url(&input));
        }

        #[test]
        fn explicit_scheme_is_url(scheme in "https?", rest in ".*") {
            let input = format!("{}://{}", scheme, rest);
            prop_assert!(is_url(&input));
        }

        #[test]
        fn formatting_is_idempotent(s in "\\PC{0,24}") {
            let once = format_url(&s, SearchEngineId::Brave);
            let twice = format_url(&once, SearchEngineId::Brave);
            prop_assert_eq!(once, twice);
        }
    }
}
