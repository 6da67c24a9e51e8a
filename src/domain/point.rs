/// A WGS84 position treated as a planar (x = lng, y = lat) coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Planar Euclidean distance in degrees
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        dlat * dlat + dlng * dlng
    }
}

impl From<(f64, f64)> for Point {
    /// Build from a `(lat, lng)` pair
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.lat, p.lng)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::coord! { x: p.lng, y: p.lat }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}
