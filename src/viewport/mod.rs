pub mod controller;

pub use controller::{Phase, ViewSettings, ViewportController, ViewportState};
