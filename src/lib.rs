pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod network;
pub mod obstacle;
pub mod operations;

pub use config::RoutingConfig;
pub use error::{CorridorError, Result};
pub use obstacle::{Obstacle, ObstacleId, ObstacleSet};
