//! One-shot viewport centring
//!
//! The map view is centred on the configured default exactly once, on the
//! first lifecycle event that arrives while centring is wanted (the caller
//! supplied no explicit starting pin). Every later event is a no-op, so
//! re-renders caused by unrelated state changes never snap the view back
//! while the user is panning.

use tracing::debug;

use crate::domain::Point;
use crate::geometry::Bounds;

/// Default view resolved from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub center: Point,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Pan limits; the view centre is kept inside them when set
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub center: Point,
    pub zoom: u8,
    /// Monotonic: once true it stays true for the controller's lifetime
    pub has_centered_once: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// Terminal
    Centered,
}

#[derive(Debug)]
pub struct ViewportController {
    settings: ViewSettings,
    state: ViewportState,
    phase: Phase,
    applied: usize,
}

impl ViewportController {
    pub fn new(settings: ViewSettings) -> Self {
        let state = ViewportState {
            center: settings.center,
            zoom: settings.zoom,
            has_centered_once: false,
        };
        Self {
            settings,
            state,
            phase: Phase::Uninitialized,
            applied: 0,
        }
    }

    /// Handle a render/lifecycle event
    ///
    /// Returns the view to apply when this event performs the one-time
    /// centring, `None` otherwise.
    pub fn on_lifecycle(&mut self, should_center: bool) -> Option<ViewportState> {
        if self.phase == Phase::Centered || !should_center {
            return None;
        }

        self.state = ViewportState {
            center: self.keep_in_bounds(self.settings.center),
            zoom: self.settings.zoom,
            has_centered_once: true,
        };
        self.phase = Phase::Centered;
        self.applied += 1;

        debug!(
            lat = self.state.center.lat,
            lng = self.state.center.lng,
            zoom = self.state.zoom,
            "viewport centred"
        );
        Some(self.state)
    }

    /// Record a pan or zoom made by the user
    ///
    /// The zoom is clamped to the configured limits and the centre to the
    /// pan bounds. Does not affect the one-shot centring.
    pub fn user_moved(&mut self, center: Point, zoom: u8) -> ViewportState {
        self.state.center = self.keep_in_bounds(center);
        self.state.zoom = zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);
        self.state
    }

    fn keep_in_bounds(&self, p: Point) -> Point {
        match self.settings.bounds {
            Some(bounds) => bounds.clamp(p),
            None => p,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of times the default view has been applied; never exceeds 1
    pub fn applied_count(&self) -> usize {
        self.applied
    }
}
