//! Presentation values derived from recognizer and tracker state
//!
//! Pure functions, recomputed on every touch move or state change; the host
//! binds them to its views.

use serde::Serialize;

use crate::gesture::SwipeEdge;
use crate::state::SessionState;

/// Furthest the page slides while edge-swiping
pub const MAX_PAGE_SLIDE: f32 = 300.0;

/// Page offset for an edge swipe: clamped to [`MAX_PAGE_SLIDE`], positive when
/// swiping back from the left edge, negative when swiping forward.
pub fn page_translate_x(distance: f32, edge: SwipeEdge) -> f32 {
    distance.clamp(0.0, MAX_PAGE_SLIDE) * edge.direction()
}

/// Spinner rotation in degrees: one full turn as the pull reaches the threshold
pub fn spinner_rotation_degrees(pull_distance: f32, threshold: f32) -> f32 {
    pull_fraction(pull_distance, threshold) * 360.0
}

/// Spinner opacity: fades in linearly until the threshold
pub fn spinner_opacity(pull_distance: f32, threshold: f32) -> f32 {
    pull_fraction(pull_distance, threshold)
}

fn pull_fraction(pull_distance: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (pull_distance / threshold).clamp(0.0, 1.0)
}

/// What the header's trailing button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAction {
    Stop,
    Reload,
}

/// Everything the header, toolbar and surface need to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeSnapshot {
    pub state: SessionState,
    pub url: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub progress: f32,
    pub header_action: HeaderAction,
    pub page_offset_x: f32,
    pub surface_offset_y: f32,
    pub refresh_pull: f32,
    pub spinner_rotation: f32,
    pub spinner_opacity: f32,
    pub refreshing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset_direction_and_clamp() {
        assert_eq!(page_translate_x(120.0, SwipeEdge::Left), 120.0);
        assert_eq!(page_translate_x(120.0, SwipeEdge::Right), -120.0);
        assert_eq!(page_translate_x(900.0, SwipeEdge::Left), MAX_PAGE_SLIDE);
        assert_eq!(page_translate_x(-5.0, SwipeEdge::Left), 0.0);
    }

    #[test]
    fn test_spinner_interpolation() {
        assert_eq!(spinner_rotation_degrees(0.0, 80.0), 0.0);
        assert_eq!(spinner_rotation_degrees(40.0, 80.0), 180.0);
        assert_eq!(spinner_rotation_degrees(120.0, 80.0), 360.0);

        assert_eq!(spinner_opacity(40.0, 80.0), 0.5);
        assert_eq!(spinner_opacity(200.0, 80.0), 1.0);
        assert_eq!(spinner_opacity(10.0, 0.0), 0.0);
    }
}
