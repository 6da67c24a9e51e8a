use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{ClampNotice, Geofence, ValidationOutcome};
use crate::api::{AddressResolver, ReverseGeocoder};
use crate::domain::{AddressInfo, Point};

/// User gestures on the map that propose a pin position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Single tap or click on the map
    Tap(Point),
    /// The movable marker was dropped
    DragEnd(Point),
}

impl Gesture {
    pub fn point(&self) -> Point {
        match *self {
            Gesture::Tap(p) | Gesture::DragEnd(p) => p,
        }
    }
}

/// Receiver of raw candidate points from whatever UI layer hosts the map
///
/// Points must be finite and in range; the sink does not check.
pub trait CandidateSink {
    fn on_candidate(&mut self, point: Point);

    fn on_gesture(&mut self, gesture: Gesture) {
        self.on_candidate(gesture.point());
    }
}

/// An address together with the pin position it was resolved for
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub point: Point,
    pub address: AddressInfo,
}

/// Pin state for a report form's map: validates every candidate, keeps the
/// accepted position and the clamp notice, and hands out address lookups
#[derive(Debug)]
pub struct LocationPicker<G> {
    geofence: Geofence,
    resolver: Arc<AddressResolver<G>>,
    position: Point,
    explicit_start: bool,
    last_outcome: Option<ValidationOutcome>,
    notice: ClampNotice,
}

impl<G: ReverseGeocoder + 'static> LocationPicker<G> {
    /// `initial` is an existing pin (e.g. editing a saved report); without
    /// one the pin starts at `default_center`. Either is validated so the
    /// pin never starts outside the boundary.
    pub fn new(
        geofence: Geofence,
        resolver: Arc<AddressResolver<G>>,
        initial: Option<Point>,
        default_center: Point,
        notice: ClampNotice,
    ) -> Self {
        let position = geofence
            .validate(initial.unwrap_or(default_center))
            .accepted;

        Self {
            geofence,
            resolver,
            position,
            explicit_start: initial.is_some(),
            last_outcome: None,
            notice,
        }
    }

    /// Precondition for the one-shot viewport centring
    pub fn should_center(&self) -> bool {
        !self.explicit_start
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn last_outcome(&self) -> Option<ValidationOutcome> {
        self.last_outcome
    }

    pub fn notice_visible(&self, now: Instant) -> bool {
        self.notice.is_visible(now)
    }

    pub fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    pub fn handle(&mut self, gesture: Gesture, now: Instant) -> ValidationOutcome {
        self.place(gesture.point(), now)
    }

    /// Validate `candidate` and move the pin to the accepted point
    pub fn place(&mut self, candidate: Point, now: Instant) -> ValidationOutcome {
        let outcome = self.geofence.validate(candidate);

        if outcome.was_clamped {
            self.notice.raise(now);
        } else {
            self.notice.clear();
        }

        self.position = outcome.accepted;
        self.last_outcome = Some(outcome);
        outcome
    }

    /// Move the pin to the device's own location if it is inside the
    /// boundary; an outside location is rejected and the pin stays put
    pub fn use_device_location(&mut self, point: Point) -> bool {
        match self.geofence.accept_exact(point) {
            Some(p) => {
                self.position = p;
                self.notice.clear();
                true
            }
            None => {
                info!(
                    lat = point.lat,
                    lng = point.lng,
                    "device location is outside the boundary"
                );
                false
            }
        }
    }

    /// Address lookup for the current pin position
    ///
    /// The future owns everything it needs, so it can be spawned and
    /// outlive later gestures. Lookups are not sequenced: compare the
    /// returned point with [`position`](Self::position) to drop stale ones.
    pub fn lookup(&self) -> impl Future<Output = Option<ResolvedLocation>> + Send + use<G> {
        let resolver = Arc::clone(&self.resolver);
        let point = self.position;
        debug!(lat = point.lat, lng = point.lng, "address lookup started");

        async move {
            let address = resolver.resolve(point).await?;
            Some(ResolvedLocation { point, address })
        }
    }
}

impl<G: ReverseGeocoder + 'static> CandidateSink for LocationPicker<G> {
    fn on_candidate(&mut self, point: Point) {
        self.place(point, Instant::now());
    }
}
