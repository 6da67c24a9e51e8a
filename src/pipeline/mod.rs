pub mod notice;
pub mod picker;
pub mod validate;

pub use notice::ClampNotice;
pub use picker::{CandidateSink, Gesture, LocationPicker, ResolvedLocation};
pub use validate::{Geofence, ValidationOutcome, validate};
