//! Page-load progress with debounced completion
//!
//! ```text
//! progress < 1  → loading, pending completion canceled
//! progress == 1 → still loading for LOAD_COMPLETE_GRACE, then idle with progress 0
//! ```
//!
//! The grace interval keeps the loading bar from flashing on fast loads and
//! from vanishing before the final paint.

use std::time::{Duration, Instant};

use crate::timer::Deadline;

pub const LOAD_COMPLETE_GRACE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Default)]
pub struct LoadProgressTracker {
    progress: f32,
    is_loading: bool,
    completion: Deadline,
}

impl LoadProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a renderer progress report in `[0, 1]`
    pub fn report_progress(&mut self, progress: f32, now: Instant) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        self.progress = progress;
        // Any newer report supersedes a pending completion
        self.completion.cancel();

        if progress < 1.0 {
            self.is_loading = true;
        } else {
            self.completion.arm(now, LOAD_COMPLETE_GRACE);
        }
    }

    /// A new top-level navigation began; show the indicator from zero at once
    pub fn reset_for_new_navigation(&mut self) {
        self.completion.cancel();
        self.progress = 0.0;
        self.is_loading = true;
    }

    /// Fire the completion if its grace interval has elapsed. Returns true
    /// when the indicator switched off.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.completion.fire_if_due(now) {
            self.is_loading = false;
            self.progress = 0.0;
            tracing::trace!("Load indicator completed");
            return true;
        }
        false
    }

    pub fn cancel_timers(&mut self) {
        self.completion.cancel();
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn completion_pending(&self) -> bool {
        self.completion.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_idle() {
        let tracker = LoadProgressTracker::new();
        assert!(!tracker.is_loading());
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_partial_progress_is_loading() {
        let t0 = Instant::now();
        let mut tracker = LoadProgressTracker::new();
        tracker.report_progress(0.5, t0);
        assert!(tracker.is_loading());
        assert_eq!(tracker.progress(), 0.5);
    }

    #[test]
    fn test_completion_waits_for_grace() {
        let t0 = Instant::now();
        let mut tracker = LoadProgressTracker::new();
        tracker.report_progress(0.5, t0);
        tracker.report_progress(1.0, t0);

        assert!(!tracker.poll(t0 + ms(599)));
        assert!(tracker.is_loading());
        assert_eq!(tracker.progress(), 1.0);

        assert!(tracker.poll(t0 + ms(600)));
        assert!(!tracker.is_loading());
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_new_progress_cancels_pending_completion() {
        let t0 = Instant::now();
        let mut tracker = LoadProgressTracker::new();
        tracker.report_progress(1.0, t0);
        tracker.report_progress(0.5, t0 + ms(300));

        assert!(!tracker.poll(t0 + ms(1000)));
        assert!(tracker.is_loading());
        assert_eq!(tracker.progress(), 0.5);
    }

    #[test]
    fn test_repeated_completion_restarts_grace() {
        let t0 = Instant::now();
        let mut tracker = LoadProgressTracker::new();
        tracker.report_progress(1.0, t0);
        tracker.report_progress(1.0, t0 + ms(400));

        assert!(!tracker.poll(t0 + ms(700)));
        assert!(tracker.poll(t0 + ms(1000)));
    }

    #[test]
    fn test_reset_for_new_navigation() {
        let t0 = Instant::now();
        let mut tracker = LoadProgressTracker::new();
        tracker.report_progress(1.0, t0);
        tracker.reset_for_new_navigation();

        assert!(!tracker.completion_pending());
        assert!(tracker.is_loading());
        assert_eq!(tracker.progress(), 0.0);
        assert!(!tracker.poll(t0 + ms(600)));
        assert!(tracker.is_loading());
    }

    #[test]
    fn test_out_of_range_reports_are_clamped() {
        let t0 = Instant::now();
        let mut tracker = LoadProgressTracker::new();
        tracker.report_progress(1.7, t0);
        assert_eq!(tracker.progress(), 1.0);
        assert!(tracker.completion_pending());

        tracker.report_progress(f32::NAN, t0);
        assert_eq!(tracker.progress(), 0.0);
        assert!(tracker.is_loading());
    }
}
