use crate::domain::{Point, Polygon};

/// Even-odd ray-casting point-in-polygon test
///
/// Casts a ray from `point` towards increasing longitude and toggles on
/// every edge it crosses. An edge counts when exactly one endpoint lies
/// strictly north of `point.lat` and the edge's longitude at that latitude
/// is greater than `point.lng`.
///
/// # Boundary ambiguity
/// Points lying exactly on an edge or vertex are not special-cased. They
/// report whatever the crossing rule yields under floating-point rounding,
/// so a point on the southern or western edge of a square tends to count as
/// inside while one on the northern or eastern edge tends to count as
/// outside. Callers that need a strict policy must add it themselves.
pub fn contains(polygon: &Polygon, point: Point) -> bool {
    let vertices = polygon.vertices();
    let mut inside = false;

    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].lng, vertices[i].lat);
        let (xj, yj) = (vertices[j].lng, vertices[j].lat);

        // yi != yj whenever the first clause holds, so the division is safe
        if (yi > point.lat) != (yj > point.lat)
            && point.lng < (xj - xi) * (point.lat - yi) / (yj - yi) + xi
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;

    fn square() -> Polygon {
        Polygon::from_pairs(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap()
    }

    /// Concave "U" shape opening to the north
    fn u_shape() -> Polygon {
        Polygon::from_pairs(&[
            (0.0, 0.0),
            (0.0, 9.0),
            (9.0, 9.0),
            (9.0, 6.0),
            (3.0, 6.0),
            (3.0, 3.0),
            (9.0, 3.0),
            (9.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_centroid_is_inside() {
        let poly = square();
        let centroid = poly.centroid().unwrap();
        assert!(contains(&poly, centroid));
    }

    #[test]
    fn test_far_point_is_outside() {
        let poly = square();
        assert!(!contains(&poly, Point::new(500.0, -500.0)));
        assert!(!contains(&poly, Point::new(5.0, 15.0)));
        assert!(!contains(&poly, Point::new(-5.0, 5.0)));
    }

    #[test]
    fn test_closing_vertex_repeated_gives_same_answer() {
        let open = square();
        let closed = Polygon::from_pairs(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ])
        .unwrap();

        for p in [Point::new(5.0, 5.0), Point::new(5.0, 15.0), Point::new(0.5, 9.5)] {
            assert_eq!(contains(&open, p), contains(&closed, p));
        }
    }

    #[test]
    fn test_concave_notch_is_outside() {
        let poly = u_shape();
        assert!(contains(&poly, Point::new(1.5, 4.5)));
        assert!(contains(&poly, Point::new(7.5, 1.5)));
        assert!(!contains(&poly, Point::new(6.0, 4.5)));
    }

    #[test]
    fn test_agrees_with_geo_for_interior_and_exterior_samples() {
        let poly = u_shape();
        let geo_poly = poly.to_geo();

        // Sample on a half-step grid so no point falls on an edge
        for i in -2..22 {
            for k in -2..22 {
                let p = Point::new(i as f64 * 0.5 + 0.25, k as f64 * 0.5 + 0.25);
                let expected = geo_poly.contains(&geo::Point::from(geo::Coord::from(p)));
                assert_eq!(contains(&poly, p), expected, "disagreement at {:?}", p);
            }
        }
    }

    #[test]
    fn test_ucu_center_is_inside_boundary() {
        let poly = Polygon::from_pairs(crate::config::UCU_POLYGON).unwrap();
        assert!(contains(&poly, Point::new(21.0317, -89.7464)));
        assert!(!contains(&poly, Point::new(20.9670, -89.6230)));
    }
}
