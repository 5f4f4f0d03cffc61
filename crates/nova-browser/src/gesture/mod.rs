//! Touch gestures over the browser surface
//!
//! Three recognizers share one scrollable viewport:
//! - edge swipe (left/right content edge, horizontal) → back / forward
//! - pull to dismiss (header, downward) → close the browser
//! - pull to refresh (top band of content, downward) → reload
//!
//! Recognizers read the session's navigation capabilities but never write
//! them. They report what should happen as [`GestureEffect`]s, which the
//! session applies.

mod arbiter;
mod edge_swipe;
mod pull_dismiss;
mod pull_refresh;

pub use arbiter::{GestureArbiter, TerminationDecision};
pub use edge_swipe::{
    EdgeSwipeRecognizer, SwipeEdge, EDGE_BAND_WIDTH, SWIPE_ARM_DISTANCE, SWIPE_COMMIT_DISTANCE,
};
pub use pull_dismiss::{PullToDismissRecognizer, DISMISS_ARM_DISTANCE, DISMISS_THRESHOLD};
pub use pull_refresh::{
    damped_pull_distance, PullToRefreshRecognizer, REFRESH_MIN_VISIBLE, REFRESH_THRESHOLD,
};

use serde::{Deserialize, Serialize};

use crate::platform::{AnimatedProperty, Animation, ImpactStyle};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Cumulative movement from `origin` to this point
    pub fn delta_from(&self, origin: Point) -> Delta {
        Delta {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }
}

/// Cumulative movement since touch-down (positive dy is downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f32,
    pub dy: f32,
}

impl Delta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Downward and more vertical than horizontal, past `min_dy`
    pub fn is_downward_pull(&self, min_dy: f32) -> bool {
        self.dy > min_dy && self.dy > self.dx.abs()
    }
}

/// Geometry of the browser surface in logical units. The header occupies
/// `[0, header_height)`; page content starts below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
    /// Height of the band at the top of the content where pull-to-refresh starts
    pub refresh_band_height: f32,
}

impl Viewport {
    pub fn in_header(&self, point: Point) -> bool {
        point.y >= 0.0 && point.y < self.header_height
    }

    pub fn in_content(&self, point: Point) -> bool {
        point.y >= self.header_height && point.y < self.height
    }

    pub fn in_refresh_band(&self, point: Point) -> bool {
        point.y >= self.header_height && point.y < self.header_height + self.refresh_band_height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
            header_height: 56.0,
            refresh_band_height: 120.0,
        }
    }
}

/// Navigation capabilities the recognizers gate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    EdgeSwipe,
    PullDismiss,
    PullRefresh,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::EdgeSwipe => "edge-swipe",
            GestureKind::PullDismiss => "pull-dismiss",
            GestureKind::PullRefresh => "pull-refresh",
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One candidate interpretation of the active touch. Created on touch-down,
/// dropped on release or termination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub kind: GestureKind,
    pub origin: Point,
    pub current_delta: Delta,
    /// True once this recognizer has claimed the touch stream
    pub committed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// System interruption (incoming call, responder stolen)
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Back,
    Forward,
    Refresh,
    Dismiss,
}

/// Work to resume when an animation started by a recognizer finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Surface reached the bottom of the screen after a pull-to-dismiss
    DismissSlideOut,
    /// Refresh indicator settled at the threshold
    RefreshSettled,
    /// Refresh indicator collapsed back to zero
    RefreshCollapsed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    Haptic(ImpactStyle),
    Animate {
        animation: Animation,
        then: Option<FollowUp>,
    },
    Snap {
        property: AnimatedProperty,
        value: f32,
    },
    Intent(NavigationIntent),
}

impl GestureEffect {
    pub(crate) fn animate(animation: Animation) -> Self {
        GestureEffect::Animate {
            animation,
            then: None,
        }
    }

    pub(crate) fn animate_then(animation: Animation, then: FollowUp) -> Self {
        GestureEffect::Animate {
            animation,
            then: Some(then),
        }
    }
}

/// Touch lifecycle shared by the three recognizers
pub trait GestureRecognizer {
    fn kind(&self) -> GestureKind;

    /// Touch-down: may a gesture starting here belong to this recognizer?
    fn accepts_origin(&self, origin: Point, viewport: &Viewport, caps: Capabilities) -> bool;

    /// Has the touch moved far enough, the right way, to claim the stream?
    fn should_arm(&self, origin: Point, delta: Delta, viewport: &Viewport) -> bool;

    /// The arbiter handed this recognizer the touch stream
    fn grant(&mut self, origin: Point, viewport: &Viewport, caps: Capabilities);

    fn moved(&mut self, delta: Delta) -> Vec<GestureEffect>;

    fn released(&mut self, delta: Delta, caps: Capabilities) -> Vec<GestureEffect>;

    /// System interruption: reset exactly like a release without commit
    fn terminated(&mut self) -> Vec<GestureEffect>;

    /// Whether the renderer's own pan handling may take over a claimed gesture
    fn yields_to_renderer(&self) -> bool {
        true
    }
}
