//! Seams to the embedding UI framework
//!
//! The web renderer and the platform services are collaborators: the core
//! only issues commands through these traits and receives their events
//! through [`crate::BrowserSession`].

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::error::PlatformError;

/// Spring parameters used for every spring-back in the browser surface
pub const SPRING_TENSION: f32 = 50.0;
pub const SPRING_FRICTION: f32 = 8.0;

/// Imperative commands understood by the embedded web renderer
pub trait Renderer {
    fn load(&mut self, url: &str);
    fn reload(&mut self);
    fn stop_loading(&mut self);
    fn go_back(&mut self);
    fn go_forward(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Medium,
}

/// Identifies a running animation so its completion can be routed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// Presentation values the core drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedProperty {
    /// Modal slide transition: 0 on screen, 1 fully off the bottom
    SurfaceSlide,
    /// Pull-to-dismiss translation of the whole surface
    SurfaceTranslateY,
    /// Horizontal page offset while edge-swiping
    PageTranslateX,
    /// Pull-to-refresh indicator distance
    RefreshPull,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    Spring {
        property: AnimatedProperty,
        to: f32,
        tension: f32,
        friction: f32,
    },
    Timing {
        property: AnimatedProperty,
        to: f32,
        duration: Duration,
    },
}

impl Animation {
    pub fn spring(property: AnimatedProperty, to: f32) -> Self {
        Animation::Spring {
            property,
            to,
            tension: SPRING_TENSION,
            friction: SPRING_FRICTION,
        }
    }

    pub fn timing(property: AnimatedProperty, to: f32, duration: Duration) -> Self {
        Animation::Timing {
            property,
            to,
            duration,
        }
    }

    pub fn property(&self) -> AnimatedProperty {
        match self {
            Animation::Spring { property, .. } | Animation::Timing { property, .. } => *property,
        }
    }

    pub fn target(&self) -> f32 {
        match self {
            Animation::Spring { to, .. } | Animation::Timing { to, .. } => *to,
        }
    }
}

/// Host services: clock, haptics, share sheet, animation driver and the
/// mount lifecycle of the browser surface.
pub trait Platform {
    fn now(&self) -> Instant;

    fn impact(&mut self, style: ImpactStyle);

    fn share(&mut self, url: &str) -> Result<(), PlatformError>;

    /// Start an animation. The host reports completion through
    /// [`crate::BrowserSession::animation_finished`] with the same id.
    fn animate(&mut self, id: AnimationId, animation: Animation);

    /// Jump a presentation value without animating
    fn set_value(&mut self, property: AnimatedProperty, value: f32);

    /// The surface has fully closed and can be unmounted
    fn unmount(&mut self);
}
