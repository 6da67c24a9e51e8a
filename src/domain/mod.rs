pub mod address;
pub mod point;
pub mod polygon;

pub use address::{AddressInfo, RegionDefaults};
pub use point::Point;
pub use polygon::Polygon;
