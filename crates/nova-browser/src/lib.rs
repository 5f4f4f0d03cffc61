//! Nova Browser
//!
//! The in-app browser surface: load progress, navigation state
//! reconciliation, touch gesture recognition and the session that ties them
//! to an embedded web renderer.

pub mod error;
pub mod gesture;
pub mod navigation;
pub mod platform;
pub mod presentation;
pub mod progress;
pub mod session;
pub mod state;
pub mod timer;

pub use error::{BrowserError, PlatformError};
pub use gesture::{
    Capabilities, GestureArbiter, GestureEffect, GestureKind, NavigationIntent, Point, TouchEvent,
    Viewport,
};
pub use navigation::{
    NavigationState, NavigationStateReconciler, NavigationType, ReconcileOutcome, RendererEvent,
};
pub use platform::{AnimatedProperty, Animation, AnimationId, ImpactStyle, Platform, Renderer};
pub use presentation::{ChromeSnapshot, HeaderAction};
pub use progress::{LoadProgressTracker, LOAD_COMPLETE_GRACE};
pub use session::{BrowserSession, SLIDE_TRANSITION_DURATION};
pub use state::SessionState;

pub type Result<T> = std::result::Result<T, BrowserError>;
