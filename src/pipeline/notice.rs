use std::time::{Duration, Instant};

/// Transient "pin moved back inside the boundary" notice
///
/// Raised whenever a candidate is clamped and hidden again once `duration`
/// has elapsed, or as soon as a later candidate is accepted unchanged.
#[derive(Debug, Clone)]
pub struct ClampNotice {
    duration: Duration,
    raised_at: Option<Instant>,
}

impl ClampNotice {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            raised_at: None,
        }
    }

    /// Show the notice starting at `now`; raising again restarts the timer
    pub fn raise(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.raised_at = None;
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.raised_at
            .is_some_and(|t| now.saturating_duration_since(t) < self.duration)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for ClampNotice {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
