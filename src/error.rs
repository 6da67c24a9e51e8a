use thiserror::Error;

/// Errors raised while building geofence runtime types from configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeofenceError {
    #[error("boundary polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("boundary vertex {index} is not finite: ({lat}, {lng})")]
    NonFiniteVertex { index: usize, lat: f64, lng: f64 },

    #[error("invalid zoom range: min {min} is greater than max {max}")]
    InvalidZoomRange { min: u8, max: u8 },
}

/// Failures of a single reverse-geocoding lookup
///
/// These never reach callers of [`crate::api::AddressResolver::resolve`];
/// they are logged and turned into `None` there.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to geocoder failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("geocoder returned error status: {0}")]
    Status(u16),

    #[error("failed to parse geocoder response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("geocoder found no address: {0}")]
    NotFound(String),
}
