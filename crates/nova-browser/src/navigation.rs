//! Navigation state reconciliation
//!
//! The renderer announces a navigation (with its type) before its own
//! back/forward flags catch up. Trusting those flags leaves the back button
//! disabled for one event cycle after a link click; enabling back optimistically
//! risks one stale `can_go_back = false` report re-disabling it.
//!
//! ```text
//! Trusting
//!   ↓ load start: non-initial URL, user-driven type (optimistic back = true)
//! ExpectingStaleUpdate
//!   ↓ first state change (suppressed if can_go_back = false, adopted otherwise)
//! Trusting
//! ```
//!
//! At most one update is suppressed per optimistic transition.

use serde::{Deserialize, Serialize};
use url::Url;

/// How the renderer says a navigation was initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationType {
    Click,
    FormSubmit,
    Other,
    Reload,
    BackForward,
    Script,
}

impl NavigationType {
    /// Everything except reloads and history traversal counts as the user
    /// moving to a new page.
    pub fn is_user_driven(&self) -> bool {
        !matches!(self, NavigationType::Reload | NavigationType::BackForward)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationType::Click => "click",
            NavigationType::FormSubmit => "formsubmit",
            NavigationType::Other => "other",
            NavigationType::Reload => "reload",
            NavigationType::BackForward => "backforward",
            NavigationType::Script => "script",
        }
    }
}

impl std::fmt::Display for NavigationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renderer taxonomies differ per platform; unknown names are treated as
/// user-driven `Other`.
impl From<&str> for NavigationType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "click" | "linkactivated" => NavigationType::Click,
            "formsubmit" | "form-submit" | "formresubmit" => NavigationType::FormSubmit,
            "reload" => NavigationType::Reload,
            "backforward" | "back-forward" => NavigationType::BackForward,
            "script" => NavigationType::Script,
            _ => NavigationType::Other,
        }
    }
}

/// Navigation flags as last reported by (or optimistically inferred for) the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub loading: bool,
    pub url: String,
}

/// Events emitted by the embedded renderer, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum RendererEvent {
    LoadStart {
        url: String,
        navigation_type: NavigationType,
    },
    LoadProgress {
        progress: f32,
    },
    LoadEnd,
    NavigationStateChange(NavigationState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Trusting,
    ExpectingStaleUpdate,
}

/// What the reconciler did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Renderer values became the authoritative state
    Adopted,
    /// Back enabled ahead of the renderer; one stale update is expected
    Optimistic,
    /// A stale `can_go_back = false` report was discarded
    SuppressedStale,
    /// URL tracked, flags untouched
    Tracked,
}

#[derive(Debug, Clone)]
pub struct NavigationStateReconciler {
    initial_url: String,
    state: NavigationState,
    mode: Mode,
}

impl NavigationStateReconciler {
    pub fn new(initial_url: impl Into<String>) -> Self {
        let initial_url = initial_url.into();
        Self {
            state: NavigationState {
                can_go_back: false,
                can_go_forward: false,
                loading: false,
                url: initial_url.clone(),
            },
            initial_url,
            mode: Mode::Trusting,
        }
    }

    pub fn on_load_start(&mut self, url: &str, navigation_type: NavigationType) -> ReconcileOutcome {
        if !url.is_empty() {
            self.state.url = url.to_string();
        }
        self.state.loading = true;

        if navigation_type.is_user_driven() && !same_page(url, &self.initial_url) {
            self.state.can_go_back = true;
            self.state.can_go_forward = false;
            self.mode = Mode::ExpectingStaleUpdate;

            tracing::debug!(
                url = %url,
                navigation_type = %navigation_type,
                "Optimistically enabling back navigation"
            );
            return ReconcileOutcome::Optimistic;
        }

        ReconcileOutcome::Tracked
    }

    pub fn on_navigation_state_change(&mut self, incoming: &NavigationState) -> ReconcileOutcome {
        if self.mode == Mode::ExpectingStaleUpdate && !incoming.can_go_back {
            self.mode = Mode::Trusting;
            tracing::debug!(
                url = %incoming.url,
                "Suppressing stale navigation state update"
            );
            return ReconcileOutcome::SuppressedStale;
        }

        self.mode = Mode::Trusting;
        self.state.can_go_back = incoming.can_go_back;
        self.state.can_go_forward = incoming.can_go_forward;
        self.state.loading = incoming.loading;
        // The active URL never goes blank once a session has started
        if !incoming.url.is_empty() {
            self.state.url = incoming.url.clone();
        }

        tracing::trace!(
            can_go_back = incoming.can_go_back,
            can_go_forward = incoming.can_go_forward,
            "Adopted renderer navigation state"
        );
        ReconcileOutcome::Adopted
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward
    }

    pub fn url(&self) -> &str {
        &self.state.url
    }

    pub fn initial_url(&self) -> &str {
        &self.initial_url
    }

    pub fn is_expecting_stale_update(&self) -> bool {
        self.mode == Mode::ExpectingStaleUpdate
    }
}

/// Compare URLs after parsing, so `https://nova.app` equals `https://nova.app/`
fn same_page(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
