//! Decides which recognizer owns the current touch
//!
//! On touch-down every recognizer whose region contains the origin becomes a
//! candidate. The first candidate whose arming predicate holds claims the
//! stream; the others are dropped for the rest of the touch. Region plus
//! direction dominance keep the predicates disjoint in practice, and the
//! evaluation order (edge swipe, dismiss, refresh) settles the rare overlap.

use std::time::Instant;

use super::{
    Capabilities, Delta, EdgeSwipeRecognizer, FollowUp, GestureEffect, GestureKind,
    GestureRecognizer, GestureSession, Point, PullToDismissRecognizer, PullToRefreshRecognizer,
    TouchEvent, Viewport,
};

/// Answer to the renderer asking to take over the active touch
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationDecision {
    Refused,
    Granted(Vec<GestureEffect>),
}

#[derive(Debug, Default)]
pub struct GestureArbiter {
    edge_swipe: EdgeSwipeRecognizer,
    pull_dismiss: PullToDismissRecognizer,
    pull_refresh: PullToRefreshRecognizer,
    sessions: Vec<GestureSession>,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(
        &mut self,
        event: TouchEvent,
        viewport: &Viewport,
        caps: Capabilities,
    ) -> Vec<GestureEffect> {
        match event {
            TouchEvent::Down(point) => self.touch_down(point, viewport, caps),
            TouchEvent::Move(point) => self.touch_move(point, viewport, caps),
            TouchEvent::Up(point) => self.touch_up(point, caps),
            TouchEvent::Cancel => self.terminate(),
        }
    }

    /// The committed gesture, if any recognizer has claimed the touch
    pub fn active(&self) -> Option<&GestureSession> {
        self.sessions.iter().find(|s| s.committed)
    }

    pub fn candidates(&self) -> impl Iterator<Item = GestureKind> + '_ {
        self.sessions.iter().map(|s| s.kind)
    }

    pub fn request_termination(&mut self) -> TerminationDecision {
        let Some(kind) = self.active().map(|s| s.kind) else {
            self.sessions.clear();
            return TerminationDecision::Granted(Vec::new());
        };

        if !self.recognizer(kind).yields_to_renderer() {
            tracing::trace!(gesture = %kind, "Refusing to yield gesture");
            return TerminationDecision::Refused;
        }

        TerminationDecision::Granted(self.terminate())
    }

    /// System interruption or teardown: reset whatever was claimed
    pub fn terminate(&mut self) -> Vec<GestureEffect> {
        let active = self.active().map(|s| s.kind);
        self.sessions.clear();
        match active {
            Some(kind) => {
                tracing::debug!(gesture = %kind, "Gesture terminated");
                self.recognizer_mut(kind).terminated()
            }
            None => Vec::new(),
        }
    }

    /// Route an animation completion back to the recognizer that asked for it
    pub fn follow_up(&mut self, follow_up: FollowUp, finished: bool, now: Instant) -> Vec<GestureEffect> {
        match follow_up {
            FollowUp::DismissSlideOut => self.pull_dismiss.slide_out_finished(finished),
            FollowUp::RefreshSettled => self.pull_refresh.refresh_settled(now),
            FollowUp::RefreshCollapsed => {
                self.pull_refresh.refresh_collapsed();
                Vec::new()
            }
        }
    }

    pub fn poll(&mut self, now: Instant) -> Vec<GestureEffect> {
        self.pull_refresh.poll(now)
    }

    pub fn cancel_timers(&mut self) {
        self.pull_refresh.cancel_timers();
    }

    pub fn edge_swipe(&self) -> &EdgeSwipeRecognizer {
        &self.edge_swipe
    }

    pub fn pull_dismiss(&self) -> &PullToDismissRecognizer {
        &self.pull_dismiss
    }

    pub fn pull_refresh(&self) -> &PullToRefreshRecognizer {
        &self.pull_refresh
    }

    fn touch_down(&mut self, point: Point, viewport: &Viewport, caps: Capabilities) -> Vec<GestureEffect> {
        // A down without an up means we missed the end of the previous touch
        let effects = self.terminate();

        for kind in [
            GestureKind::EdgeSwipe,
            GestureKind::PullDismiss,
            GestureKind::PullRefresh,
        ] {
            if self.recognizer(kind).accepts_origin(point, viewport, caps) {
                self.sessions.push(GestureSession {
                    kind,
                    origin: point,
                    current_delta: Delta::default(),
                    committed: false,
                });
            }
        }

        effects
    }

    fn touch_move(&mut self, point: Point, viewport: &Viewport, caps: Capabilities) -> Vec<GestureEffect> {
        for session in &mut self.sessions {
            session.current_delta = point.delta_from(session.origin);
        }

        if let Some(session) = self.active().copied() {
            return self.recognizer_mut(session.kind).moved(session.current_delta);
        }

        let claimed = self
            .sessions
            .iter()
            .find(|s| {
                self.recognizer(s.kind)
                    .should_arm(s.origin, s.current_delta, viewport)
            })
            .copied();

        let Some(mut session) = claimed else {
            return Vec::new();
        };

        session.committed = true;
        self.sessions.clear();
        self.sessions.push(session);

        tracing::debug!(gesture = %session.kind, "Gesture claimed touch stream");

        let recognizer = self.recognizer_mut(session.kind);
        recognizer.grant(session.origin, viewport, caps);
        recognizer.moved(session.current_delta)
    }

    fn touch_up(&mut self, point: Point, caps: Capabilities) -> Vec<GestureEffect> {
        let active = self.active().copied();
        self.sessions.clear();

        match active {
            Some(session) => {
                let delta = point.delta_from(session.origin);
                self.recognizer_mut(session.kind).released(delta, caps)
            }
            None => Vec::new(),
        }
    }

    fn recognizer(&self, kind: GestureKind) -> &dyn GestureRecognizer {
        match kind {
            GestureKind::EdgeSwipe => &self.edge_swipe,
            GestureKind::PullDismiss => &self.pull_dismiss,
            GestureKind::PullRefresh => &self.pull_refresh,
        }
    }

    fn recognizer_mut(&mut self, kind: GestureKind) -> &mut dyn GestureRecognizer {
        match kind {
            GestureKind::EdgeSwipe => &mut self.edge_swipe,
            GestureKind::PullDismiss => &mut self.pull_dismiss,
            GestureKind::PullRefresh => &mut self.pull_refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::NavigationIntent;

    const BACK_ONLY: Capabilities = Capabilities {
        can_go_back: true,
        can_go_forward: false,
    };

    fn drag(
        arbiter: &mut GestureArbiter,
        caps: Capabilities,
        from: Point,
        path: &[Point],
    ) -> Vec<GestureEffect> {
        let viewport = Viewport::default();
        let mut effects = arbiter.handle(TouchEvent::Down(from), &viewport, caps);
        for point in path {
            effects.extend(arbiter.handle(TouchEvent::Move(*point), &viewport, caps));
        }
        let last = path.last().copied().unwrap_or(from);
        effects.extend(arbiter.handle(TouchEvent::Up(last), &viewport, caps));
        effects
    }

    fn intents(effects: &[GestureEffect]) -> Vec<NavigationIntent> {
        effects
            .iter()
            .filter_map(|e| match e {
                GestureEffect::Intent(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_left_edge_drag_fires_back() {
        let mut arbiter = GestureArbiter::new();
        let effects = drag(
            &mut arbiter,
            BACK_ONLY,
            Point::new(10.0, 400.0),
            &[Point::new(30.0, 401.0), Point::new(110.0, 402.0)],
        );
        assert_eq!(intents(&effects), vec![NavigationIntent::Back]);
        assert!(arbiter.active().is_none());
    }

    #[test]
    fn test_left_edge_drag_without_history_does_nothing() {
        let mut arbiter = GestureArbiter::new();
        let effects = drag(
            &mut arbiter,
            Capabilities::default(),
            Point::new(10.0, 400.0),
            &[Point::new(30.0, 400.0), Point::new(110.0, 400.0)],
        );
        assert!(intents(&effects).is_empty());
    }

    #[test]
    fn test_mid_screen_drag_never_arms() {
        let mut arbiter = GestureArbiter::new();
        let viewport = Viewport::default();
        let caps = Capabilities {
            can_go_back: true,
            can_go_forward: true,
        };
        arbiter.handle(TouchEvent::Down(Point::new(200.0, 400.0)), &viewport, caps);
        assert_eq!(arbiter.candidates().count(), 0);

        arbiter.handle(TouchEvent::Move(Point::new(390.0, 400.0)), &viewport, caps);
        assert!(arbiter.active().is_none());
        let effects = arbiter.handle(TouchEvent::Up(Point::new(390.0, 400.0)), &viewport, caps);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_corner_touch_claims_by_direction() {
        let viewport = Viewport::default();
        let corner = Point::new(10.0, viewport.header_height + 5.0);

        let mut arbiter = GestureArbiter::new();
        arbiter.handle(TouchEvent::Down(corner), &viewport, BACK_ONLY);
        assert_eq!(arbiter.candidates().count(), 2);
        arbiter.handle(
            TouchEvent::Move(Point::new(12.0, corner.y + 30.0)),
            &viewport,
            BACK_ONLY,
        );
        assert_eq!(arbiter.active().map(|s| s.kind), Some(GestureKind::PullRefresh));

        let mut arbiter = GestureArbiter::new();
        arbiter.handle(TouchEvent::Down(corner), &viewport, BACK_ONLY);
        arbiter.handle(
            TouchEvent::Move(Point::new(40.0, corner.y + 3.0)),
            &viewport,
            BACK_ONLY,
        );
        assert_eq!(arbiter.active().map(|s| s.kind), Some(GestureKind::EdgeSwipe));

        // Once claimed, a later vertical movement does not switch recognizers
        arbiter.handle(
            TouchEvent::Move(Point::new(40.0, corner.y + 200.0)),
            &viewport,
            BACK_ONLY,
        );
        assert_eq!(arbiter.active().map(|s| s.kind), Some(GestureKind::EdgeSwipe));
    }

    #[test]
    fn test_vertical_pull_in_left_corner_goes_to_refresh() {
        let viewport = Viewport::default();
        let mut arbiter = GestureArbiter::new();
        let corner = Point::new(10.0, viewport.header_height + 10.0);
        arbiter.handle(TouchEvent::Down(corner), &viewport, BACK_ONLY);
        arbiter.handle(
            TouchEvent::Move(Point::new(22.0, corner.y + 54.0)),
            &viewport,
            BACK_ONLY,
        );
        assert_eq!(arbiter.active().map(|s| s.kind), Some(GestureKind::PullRefresh));
    }

    #[test]
    fn test_drag_toward_edge_leaves_touch_to_renderer() {
        let viewport = Viewport::default();
        let mut arbiter = GestureArbiter::new();
        arbiter.handle(TouchEvent::Down(Point::new(40.0, 400.0)), &viewport, BACK_ONLY);
        arbiter.handle(TouchEvent::Move(Point::new(25.0, 400.0)), &viewport, BACK_ONLY);

        assert!(arbiter.active().is_none());
        assert!(matches!(
            arbiter.request_termination(),
            TerminationDecision::Granted(_)
        ));
        assert_eq!(arbiter.edge_swipe().page_offset(), 0.0);
    }

    #[test]
    fn test_edge_swipe_refuses_termination_others_yield() {
        let viewport = Viewport::default();
        let mut arbiter = GestureArbiter::new();
        arbiter.handle(TouchEvent::Down(Point::new(10.0, 400.0)), &viewport, BACK_ONLY);
        arbiter.handle(TouchEvent::Move(Point::new(60.0, 400.0)), &viewport, BACK_ONLY);
        assert_eq!(arbiter.request_termination(), TerminationDecision::Refused);
        assert!(arbiter.active().is_some());

        let mut arbiter = GestureArbiter::new();
        arbiter.handle(TouchEvent::Down(Point::new(200.0, 20.0)), &viewport, BACK_ONLY);
        arbiter.handle(TouchEvent::Move(Point::new(200.0, 60.0)), &viewport, BACK_ONLY);
        assert!(matches!(
            arbiter.request_termination(),
            TerminationDecision::Granted(_)
        ));
        assert!(arbiter.active().is_none());
        assert_eq!(arbiter.pull_dismiss().translate_y(), 0.0);
    }

    #[test]
    fn test_tap_in_header_has_no_effect() {
        let mut arbiter = GestureArbiter::new();
        let effects = drag(
            &mut arbiter,
            BACK_ONLY,
            Point::new(200.0, 20.0),
            &[Point::new(201.0, 22.0)],
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_cancel_mid_pull_resets_refresh_latch() {
        let viewport = Viewport::default();
        let mut arbiter = GestureArbiter::new();
        let start = Point::new(200.0, viewport.header_height + 10.0);
        arbiter.handle(TouchEvent::Down(start), &viewport, BACK_ONLY);
        arbiter.handle(
            TouchEvent::Move(Point::new(200.0, start.y + 260.0)),
            &viewport,
            BACK_ONLY,
        );
        assert!(arbiter.pull_refresh().haptic_latched());

        let effects = arbiter.handle(TouchEvent::Cancel, &viewport, BACK_ONLY);
        assert!(intents(&effects).is_empty());
        assert!(!arbiter.pull_refresh().haptic_latched());
        assert_eq!(arbiter.pull_refresh().pull_distance(), 0.0);
    }
}
