//! Pull the header down to close the browser

use std::time::Duration;

use super::{
    Capabilities, Delta, FollowUp, GestureEffect, GestureKind, GestureRecognizer,
    NavigationIntent, Point, Viewport,
};
use crate::platform::{AnimatedProperty, Animation};

/// Downward movement needed before the pull claims the touch
pub const DISMISS_ARM_DISTANCE: f32 = 5.0;
/// Pull distance at release needed to dismiss
pub const DISMISS_THRESHOLD: f32 = 100.0;
/// Where the surface is sent when dismissed
pub const DISMISS_OFFSCREEN_Y: f32 = 500.0;
pub const DISMISS_SLIDE_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Default)]
pub struct PullToDismissRecognizer {
    translate_y: f32,
    dismissing: bool,
}

impl PullToDismissRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current surface translation; follows the finger with no damping
    pub fn translate_y(&self) -> f32 {
        self.translate_y
    }

    pub fn is_dismissing(&self) -> bool {
        self.dismissing
    }

    /// The surface has left the screen (or the animation was interrupted).
    /// Dismissal proceeds either way; the reset is best-effort.
    pub fn slide_out_finished(&mut self, finished: bool) -> Vec<GestureEffect> {
        if !finished {
            tracing::warn!("Dismiss animation interrupted; dismissing anyway");
        }
        self.dismissing = false;
        self.translate_y = 0.0;

        vec![
            GestureEffect::Intent(NavigationIntent::Dismiss),
            GestureEffect::Snap {
                property: AnimatedProperty::SurfaceTranslateY,
                value: 0.0,
            },
        ]
    }

    fn spring_back(&mut self) -> Vec<GestureEffect> {
        self.translate_y = 0.0;
        vec![GestureEffect::animate(Animation::spring(
            AnimatedProperty::SurfaceTranslateY,
            0.0,
        ))]
    }
}

impl GestureRecognizer for PullToDismissRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::PullDismiss
    }

    fn accepts_origin(&self, origin: Point, viewport: &Viewport, _caps: Capabilities) -> bool {
        !self.dismissing && viewport.in_header(origin)
    }

    fn should_arm(&self, _origin: Point, delta: Delta, _viewport: &Viewport) -> bool {
        delta.is_downward_pull(DISMISS_ARM_DISTANCE)
    }

    fn grant(&mut self, _origin: Point, _viewport: &Viewport, _caps: Capabilities) {
        self.translate_y = 0.0;
    }

    fn moved(&mut self, delta: Delta) -> Vec<GestureEffect> {
        if delta.dy <= 0.0 {
            return Vec::new();
        }
        self.translate_y = delta.dy;
        vec![GestureEffect::Snap {
            property: AnimatedProperty::SurfaceTranslateY,
            value: self.translate_y,
        }]
    }

    fn released(&mut self, delta: Delta, _caps: Capabilities) -> Vec<GestureEffect> {
        if delta.dy > DISMISS_THRESHOLD {
            self.dismissing = true;
            tracing::debug!(dy = delta.dy, "Pull to dismiss committed");
            return vec![GestureEffect::animate_then(
                Animation::timing(
                    AnimatedProperty::SurfaceTranslateY,
                    DISMISS_OFFSCREEN_Y,
                    DISMISS_SLIDE_DURATION,
                ),
                FollowUp::DismissSlideOut,
            )];
        }

        self.spring_back()
    }

    fn terminated(&mut self) -> Vec<GestureEffect> {
        self.spring_back()
    }
}
