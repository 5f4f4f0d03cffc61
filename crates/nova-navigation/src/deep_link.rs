//! Links handed to the app by other applications

use url::Url;

/// Where an external link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepLinkSource {
    /// The link that launched the app (cold start)
    Launch,
    /// A link delivered while the app was already running
    Incoming,
}

/// Returns the URL to open if an external link is a web page. Only `http` and
/// `https` links are accepted; development-server and custom schemes are
/// ignored.
pub fn accept_external_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return None;
    }

    match Url::parse(raw) {
        Ok(_) => Some(raw.to_string()),
        Err(e) => {
            tracing::debug!(url = %raw, "Rejecting malformed external link: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_web_links() {
        assert_eq!(
            accept_external_url("https://example.com/a?b=c").as_deref(),
            Some("https://example.com/a?b=c")
        );
        assert_eq!(
            accept_external_url("http://example.com").as_deref(),
            Some("http://example.com")
        );
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(accept_external_url("exp://192.168.1.10:8081"), None);
        assert_eq!(accept_external_url("nova://settings"), None);
        assert_eq!(accept_external_url("mailto:someone@example.com"), None);
        assert_eq!(accept_external_url(""), None);
    }

    #[test]
    fn test_rejects_malformed_web_links() {
        assert_eq!(accept_external_url("https://"), None);
    }
}
