pub mod batch;
pub mod merge;
pub mod offset;
pub mod route;
pub mod sequence;
pub mod simplify;

pub use batch::{LayeredCurve, NetworkOutcome, NetworkRequest, RouteNetworks};
pub use merge::MergeObstacles;
pub use offset::{OffsetSide, PolylineOffset2D};
pub use route::RouteBetween;
pub use sequence::{Arrangement, BestOrder, BestOrderWithObstacles, Guide, GuidedArrangement};
pub use simplify::SimplifyPath;
