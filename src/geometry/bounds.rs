use serde::Deserialize;

use crate::domain::Point;

/// Axis-aligned lat/lng box
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Box spanning two corners given in any order
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            south: a.lat.min(b.lat),
            west: a.lng.min(b.lng),
            north: a.lat.max(b.lat),
            east: a.lng.max(b.lng),
        }
    }

    /// Degenerate box holding a single point
    pub fn around(p: Point) -> Self {
        Self::new(p, p)
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[Point]) {
        for p in points {
            self.south = self.south.min(p.lat);
            self.north = self.north.max(p.lat);
            self.west = self.west.min(p.lng);
            self.east = self.east.max(p.lng);
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.south..=self.north).contains(&p.lat) && (self.west..=self.east).contains(&p.lng)
    }

    /// Nearest point inside the box
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.lat.clamp(self.south, self.north),
            p.lng.clamp(self.west, self.east),
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_around_point() {
        let mut bounds = Bounds::around(Point::new(0.0, 0.0));
        bounds.expand(&[Point::new(1000.0, 2000.0), Point::new(500.0, -10.0)]);

        assert_eq!(bounds.south, 0.0);
        assert_eq!(bounds.north, 1000.0);
        assert_eq!(bounds.west, -10.0);
        assert_eq!(bounds.east, 2000.0);
        assert_eq!(bounds.width(), 2010.0);
        assert_eq!(bounds.height(), 1000.0);
    }

    #[test]
    fn test_clamp_moves_point_inside() {
        let bounds = Bounds::new(Point::new(20.98, -89.79), Point::new(21.08, -89.71));
        let clamped = bounds.clamp(Point::new(21.5, -89.75));
        assert_eq!(clamped, Point::new(21.08, -89.75));
        assert!(bounds.contains(clamped));

        let inside = Point::new(21.0, -89.75);
        assert_eq!(bounds.clamp(inside), inside);
    }

    #[test]
    fn test_center() {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(bounds.center(), Point::new(5.0, 10.0));
    }
}
