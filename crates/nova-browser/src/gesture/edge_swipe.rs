//! Horizontal edge swipe for history navigation
//!
//! A drag that starts in the left band and moves right means back; one that
//! starts in the right band and moves left means forward. Once claimed, the
//! gesture is never handed to the renderer's own pan handling.

use super::{
    Capabilities, Delta, GestureEffect, GestureKind, GestureRecognizer, NavigationIntent, Point,
    Viewport,
};
use crate::platform::AnimatedProperty;
use crate::presentation::page_translate_x;

/// Width of the touch band at each side of the content
pub const EDGE_BAND_WIDTH: f32 = 50.0;
/// Horizontal movement needed before the swipe claims the touch
pub const SWIPE_ARM_DISTANCE: f32 = 10.0;
/// Horizontal distance at release needed to navigate
pub const SWIPE_COMMIT_DISTANCE: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEdge {
    /// Swipe right from the left edge: back
    Left,
    /// Swipe left from the right edge: forward
    Right,
}

impl SwipeEdge {
    fn at(origin: Point, viewport: &Viewport) -> Option<Self> {
        if !viewport.in_content(origin) {
            return None;
        }
        if origin.x < EDGE_BAND_WIDTH {
            Some(SwipeEdge::Left)
        } else if origin.x > viewport.width - EDGE_BAND_WIDTH {
            Some(SwipeEdge::Right)
        } else {
            None
        }
    }

    fn is_enabled(&self, caps: Capabilities) -> bool {
        match self {
            SwipeEdge::Left => caps.can_go_back,
            SwipeEdge::Right => caps.can_go_forward,
        }
    }

    /// Sign of dx that moves away from this edge
    pub fn direction(&self) -> f32 {
        match self {
            SwipeEdge::Left => 1.0,
            SwipeEdge::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EdgeSwipeRecognizer {
    edge: Option<SwipeEdge>,
    distance: f32,
}

impl EdgeSwipeRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(&self) -> Option<SwipeEdge> {
        self.edge
    }

    /// Absolute horizontal distance of the active swipe
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Page offset for the slide feedback, signed by swipe direction
    pub fn page_offset(&self) -> f32 {
        match self.edge {
            Some(edge) => page_translate_x(self.distance, edge),
            None => 0.0,
        }
    }

    fn reset(&mut self) -> Vec<GestureEffect> {
        self.edge = None;
        self.distance = 0.0;
        vec![GestureEffect::Snap {
            property: AnimatedProperty::PageTranslateX,
            value: 0.0,
        }]
    }
}

impl GestureRecognizer for EdgeSwipeRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::EdgeSwipe
    }

    fn accepts_origin(&self, origin: Point, viewport: &Viewport, caps: Capabilities) -> bool {
        SwipeEdge::at(origin, viewport).is_some_and(|edge| edge.is_enabled(caps))
    }

    /// Arms only on a mostly horizontal drag away from the origin edge
    fn should_arm(&self, origin: Point, delta: Delta, viewport: &Viewport) -> bool {
        let Some(edge) = SwipeEdge::at(origin, viewport) else {
            return false;
        };
        delta.dx * edge.direction() > SWIPE_ARM_DISTANCE && delta.dx.abs() > delta.dy.abs()
    }

    fn grant(&mut self, origin: Point, viewport: &Viewport, caps: Capabilities) {
        self.edge = SwipeEdge::at(origin, viewport).filter(|edge| edge.is_enabled(caps));
        self.distance = 0.0;
        debug_assert!(self.edge.is_some(), "edge swipe granted outside an enabled edge band");
    }

    fn moved(&mut self, delta: Delta) -> Vec<GestureEffect> {
        self.distance = delta.dx.abs();
        tracing::trace!(distance = self.distance, "Edge swipe moved");
        vec![GestureEffect::Snap {
            property: AnimatedProperty::PageTranslateX,
            value: self.page_offset(),
        }]
    }

    fn released(&mut self, delta: Delta, caps: Capabilities) -> Vec<GestureEffect> {
        let edge = self.edge;
        let mut effects = self.reset();

        let Some(edge) = edge else {
            return effects;
        };

        let travelled = delta.dx * edge.direction();
        if travelled > SWIPE_COMMIT_DISTANCE && edge.is_enabled(caps) {
            let intent = match edge {
                SwipeEdge::Left => NavigationIntent::Back,
                SwipeEdge::Right => NavigationIntent::Forward,
            };
            tracing::debug!(?intent, travelled, "Edge swipe committed");
            effects.push(GestureEffect::Intent(intent));
        }

        effects
    }

    fn terminated(&mut self) -> Vec<GestureEffect> {
        self.reset()
    }

    fn yields_to_renderer(&self) -> bool {
        false
    }
}
