pub mod bounds;
pub mod containment;
pub mod projection;

pub use bounds::Bounds;
pub use containment::contains;
pub use projection::{closest_point_on_segment, nearest_boundary_point};
