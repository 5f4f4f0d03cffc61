//! Pull down at the top of the page to reload
//!
//! The indicator travels a damped fraction of the finger distance and stops
//! at 1.5x the threshold. A light haptic marks the moment the threshold is
//! first reached; the latch keeps it to one pulse per gesture. After a
//! committed pull the spinner stays up for at least
//! [`REFRESH_MIN_VISIBLE`] before collapsing.

use std::time::{Duration, Instant};

use super::{
    Capabilities, Delta, FollowUp, GestureEffect, GestureKind, GestureRecognizer,
    NavigationIntent, Point, Viewport,
};
use crate::platform::{AnimatedProperty, Animation, ImpactStyle};
use crate::timer::Deadline;

pub const REFRESH_ARM_DISTANCE: f32 = 5.0;
pub const REFRESH_THRESHOLD: f32 = 80.0;
pub const REFRESH_DAMPING: f32 = 0.4;
pub const REFRESH_MAX_PULL_FACTOR: f32 = 1.5;
pub const REFRESH_MIN_VISIBLE: Duration = Duration::from_millis(500);
pub const REFRESH_COLLAPSE_DURATION: Duration = Duration::from_millis(300);

/// Rubber-band damping: `min(dy * 0.4, threshold * 1.5)`
pub fn damped_pull_distance(raw_dy: f32, threshold: f32) -> f32 {
    (raw_dy * REFRESH_DAMPING).min(threshold * REFRESH_MAX_PULL_FACTOR)
}

#[derive(Debug, Clone)]
pub struct PullToRefreshRecognizer {
    threshold: f32,
    pull_distance: f32,
    haptic_latched: bool,
    refreshing: bool,
    hold: Deadline,
}

impl Default for PullToRefreshRecognizer {
    fn default() -> Self {
        Self::with_threshold(REFRESH_THRESHOLD)
    }
}

impl PullToRefreshRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            pull_distance: 0.0,
            haptic_latched: false,
            refreshing: false,
            hold: Deadline::default(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn pull_distance(&self) -> f32 {
        self.pull_distance
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn haptic_latched(&self) -> bool {
        self.haptic_latched
    }

    /// The spinner is being held for its minimum visible time
    pub fn hold_pending(&self) -> bool {
        self.hold.is_armed()
    }

    /// The indicator reached the threshold position: start the refresh and
    /// keep the spinner visible for the minimum duration.
    pub fn refresh_settled(&mut self, now: Instant) -> Vec<GestureEffect> {
        self.refreshing = true;
        self.hold.arm(now, REFRESH_MIN_VISIBLE);
        tracing::debug!("Pull to refresh triggered");
        vec![GestureEffect::Intent(NavigationIntent::Refresh)]
    }

    /// Minimum visible time elapsed: collapse the indicator
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEffect> {
        if !self.hold.fire_if_due(now) {
            return Vec::new();
        }
        vec![GestureEffect::animate_then(
            Animation::timing(AnimatedProperty::RefreshPull, 0.0, REFRESH_COLLAPSE_DURATION),
            FollowUp::RefreshCollapsed,
        )]
    }

    pub fn refresh_collapsed(&mut self) {
        self.refreshing = false;
        self.haptic_latched = false;
        self.pull_distance = 0.0;
    }

    pub fn cancel_timers(&mut self) {
        self.hold.cancel();
    }

    fn spring_back(&mut self) -> Vec<GestureEffect> {
        self.pull_distance = 0.0;
        self.haptic_latched = false;
        vec![GestureEffect::animate(Animation::spring(
            AnimatedProperty::RefreshPull,
            0.0,
        ))]
    }
}

impl GestureRecognizer for PullToRefreshRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::PullRefresh
    }

    fn accepts_origin(&self, origin: Point, viewport: &Viewport, _caps: Capabilities) -> bool {
        viewport.in_refresh_band(origin)
    }

    fn should_arm(&self, _origin: Point, delta: Delta, _viewport: &Viewport) -> bool {
        delta.is_downward_pull(REFRESH_ARM_DISTANCE)
    }

    fn grant(&mut self, _origin: Point, _viewport: &Viewport, _caps: Capabilities) {}

    fn moved(&mut self, delta: Delta) -> Vec<GestureEffect> {
        if delta.dy <= 0.0 || self.refreshing {
            return Vec::new();
        }

        self.pull_distance = damped_pull_distance(delta.dy, self.threshold);
        let mut effects = vec![GestureEffect::Snap {
            property: AnimatedProperty::RefreshPull,
            value: self.pull_distance,
        }];

        if self.pull_distance >= self.threshold && !self.haptic_latched {
            self.haptic_latched = true;
            effects.push(GestureEffect::Haptic(ImpactStyle::Light));
        }

        effects
    }

    fn released(&mut self, delta: Delta, _caps: Capabilities) -> Vec<GestureEffect> {
        let damped = damped_pull_distance(delta.dy, self.threshold);

        if damped > self.threshold && !self.refreshing {
            self.pull_distance = self.threshold;
            return vec![GestureEffect::animate_then(
                Animation::spring(AnimatedProperty::RefreshPull, self.threshold),
                FollowUp::RefreshSettled,
            )];
        }

        self.spring_back()
    }

    fn terminated(&mut self) -> Vec<GestureEffect> {
        self.spring_back()
    }
}
