//! Browser session lifecycle
//!
//! ```text
//! Closed
//!   ↓ open(url)
//! Opening
//!   ↓ slide-in finished
//! Active
//!   ↓ dismiss (Done, pull-to-dismiss, system back)
//! Closing
//!   ↓ slide-out finished
//! Closed
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Nothing presented
    #[default]
    Closed,
    /// Slide-in transition running
    Opening,
    /// Page visible and interactive
    Active,
    /// Slide-out transition running
    Closing,
}

impl SessionState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Closed, SessionState::Opening)
                | (SessionState::Opening, SessionState::Active)
                | (SessionState::Active, SessionState::Closing)
                | (SessionState::Closing, SessionState::Closed)
        )
    }

    /// Whether renderer events and touches are processed
    pub fn is_interactive(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Closed => "closed",
            SessionState::Opening => "opening",
            SessionState::Active => "active",
            SessionState::Closing => "closing",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
