use std::sync::Arc;
use tracing::debug;

use crate::domain::{Point, Polygon};
use crate::geometry::{contains, nearest_boundary_point};

/// Distance in degrees below which a projected point counts as the
/// candidate itself (well under a millimetre on the ground)
const ON_BOUNDARY_EPSILON: f64 = 1e-12;

/// Result of validating one candidate point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationOutcome {
    /// Inside or on the boundary, never strictly outside
    pub accepted: Point,
    /// The candidate was outside and has been moved onto the boundary
    pub was_clamped: bool,
}

/// Accept `candidate` if it lies inside `polygon`, otherwise clamp it to
/// the nearest boundary point
///
/// Containment is always checked first and projection only runs for
/// exterior points. A candidate already on the boundary, which the crossing
/// rule may report as outside, projects onto itself within
/// `ON_BOUNDARY_EPSILON` and is accepted unchanged, so every accepted point
/// validates to itself. Never fails; non-finite input is a caller error and
/// yields an unspecified outcome.
pub fn validate(polygon: &Polygon, candidate: Point) -> ValidationOutcome {
    if contains(polygon, candidate) {
        return ValidationOutcome {
            accepted: candidate,
            was_clamped: false,
        };
    }

    let accepted = nearest_boundary_point(polygon, candidate);
    if candidate.distance(&accepted) <= ON_BOUNDARY_EPSILON {
        return ValidationOutcome {
            accepted: candidate,
            was_clamped: false,
        };
    }

    debug!(
        from_lat = candidate.lat,
        from_lng = candidate.lng,
        to_lat = accepted.lat,
        to_lng = accepted.lng,
        "candidate outside boundary, clamped"
    );

    ValidationOutcome {
        accepted,
        was_clamped: true,
    }
}

/// Shared, read-only boundary with the validation operations bound to it
#[derive(Debug, Clone)]
pub struct Geofence {
    polygon: Arc<Polygon>,
}

impl Geofence {
    pub fn new(polygon: Arc<Polygon>) -> Self {
        Self { polygon }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn contains(&self, point: Point) -> bool {
        contains(&self.polygon, point)
    }

    pub fn validate(&self, candidate: Point) -> ValidationOutcome {
        validate(&self.polygon, candidate)
    }

    /// Accept `point` only if it is already inside; used for a device's own
    /// location, which is rejected rather than moved when outside
    pub fn accept_exact(&self, point: Point) -> Option<Point> {
        self.contains(point).then_some(point)
    }
}
