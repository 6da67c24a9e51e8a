use geo::{Centroid, LineString};

use super::Point;
use crate::error::GeofenceError;
use crate::geometry::Bounds;

/// A simple ring of at least three vertices, implicitly closed
///
/// The edge from the last vertex back to the first is always part of the
/// ring. Callers may repeat the first vertex at the end; that only adds a
/// zero-length closing edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeofenceError> {
        if vertices.len() < 3 {
            return Err(GeofenceError::TooFewVertices(vertices.len()));
        }

        if let Some((index, p)) = vertices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(GeofenceError::NonFiniteVertex {
                index,
                lat: p.lat,
                lng: p.lng,
            });
        }

        Ok(Self { vertices })
    }

    /// Build from `(lat, lng)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, GeofenceError> {
        Self::new(pairs.iter().copied().map(Point::from).collect())
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a polygon cannot be built with fewer than three vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges of the closed ring, `(v[i], v[i + 1])` wrapping at the end
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Area centroid of the ring, `None` when the ring has zero area and
    /// no usable line centroid either
    pub fn centroid(&self) -> Option<Point> {
        self.to_geo()
            .centroid()
            .map(|c| Point::new(c.y(), c.x()))
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::around(self.vertices[0]);
        bounds.expand(&self.vertices[1..]);
        bounds
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let ring: LineString<f64> = self.vertices.iter().map(|&p| geo::Coord::from(p)).collect();
        geo::Polygon::new(ring, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_pairs(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        let result = Polygon::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(result, Err(GeofenceError::TooFewVertices(2)));
    }

    #[test]
    fn test_rejects_non_finite_vertex() {
        let result = Polygon::from_pairs(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]);
        assert!(matches!(
            result,
            Err(GeofenceError::NonFiniteVertex { index: 1, .. })
        ));
    }

    #[test]
    fn test_edges_wrap_around() {
        let poly = square();
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (Point::new(10.0, 0.0), Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_explicitly_closed_ring_adds_zero_length_edge() {
        let poly = Polygon::from_pairs(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ])
        .unwrap();
        let last = poly.edges().last().unwrap();
        assert_eq!(last.0, last.1);
    }

    #[test]
    fn test_centroid_of_square() {
        let c = square().centroid().unwrap();
        assert!((c.lat - 5.0).abs() < 1e-9);
        assert!((c.lng - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds() {
        let b = square().bounds();
        assert_eq!(b.south, 0.0);
        assert_eq!(b.north, 10.0);
        assert_eq!(b.west, 0.0);
        assert_eq!(b.east, 10.0);
    }
}
