//! Cancelable one-shot deadlines
//!
//! The core never blocks or spawns. Timers are deadlines checked against the
//! platform clock whenever the host pumps [`crate::BrowserSession::poll_timers`].

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Arm (or re-arm) the deadline `delay` after `now`
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.at = Some(now + delay);
    }

    /// Returns true if a pending deadline was canceled
    pub fn cancel(&mut self) -> bool {
        self.at.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.at
    }

    /// Disarms and returns true once `now` has reached the deadline
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
