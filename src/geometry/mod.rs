pub mod curve;
pub mod polyline;

pub use curve::{ClosestPoint, Curve};
pub use polyline::Polyline;
