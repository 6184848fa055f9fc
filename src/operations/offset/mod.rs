mod polyline_offset_2d;

pub use polyline_offset_2d::{OffsetSide, PolylineOffset2D};
