use crate::domain::{Point, Polygon};

/// Orthogonal projection of `point` onto the segment `a`-`b`, clamped to
/// the segment's endpoints
///
/// Returns `None` for a zero-length segment (duplicate consecutive
/// vertices), which has no meaningful projection.
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> Option<Point> {
    let ap_lat = point.lat - a.lat;
    let ap_lng = point.lng - a.lng;
    let ab_lat = b.lat - a.lat;
    let ab_lng = b.lng - a.lng;

    let len_sq = ab_lat * ab_lat + ab_lng * ab_lng;
    if len_sq == 0.0 {
        return None;
    }

    let t = ((ap_lat * ab_lat + ap_lng * ab_lng) / len_sq).clamp(0.0, 1.0);

    Some(Point::new(a.lat + t * ab_lat, a.lng + t * ab_lng))
}

/// Nearest point on the polygon's perimeter to `point`
///
/// Every edge of the closed ring is sampled and degenerate edges are
/// skipped. The candidate with the smallest planar distance wins; ties keep
/// the earlier edge.
///
/// # Arguments
/// * `polygon` - Boundary ring, including its closing edge
/// * `point` - Position to project, usually one outside the ring
///
/// # Returns
/// A point lying on some edge of the ring, or the first vertex when every
/// vertex coincides
pub fn nearest_boundary_point(polygon: &Polygon, point: Point) -> Point {
    let mut best: Option<(Point, f64)> = None;

    for (a, b) in polygon.edges() {
        let Some(candidate) = closest_point_on_segment(point, a, b) else {
            continue;
        };
        let dist = point.distance_sq(&candidate);

        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }

    // Only reachable when every vertex coincides
    best.map(|(p, _)| p).unwrap_or(polygon.vertices()[0])
}
