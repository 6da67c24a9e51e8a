//! geopin - Geofenced map-pin selection for municipal report forms
//!
//! Keeps a report pin inside a municipal boundary polygon, centres the map
//! once on first load, and fills in a best-effort address for the pin.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod viewport;

pub use api::{AddressResolver, NominatimClient, ReverseGeocoder};
pub use domain::{AddressInfo, Point, Polygon, RegionDefaults};
pub use error::{GeocodeError, GeofenceError};
pub use pipeline::{Geofence, LocationPicker, ValidationOutcome, validate};
pub use viewport::ViewportController;
