//! Incremental land survey engine: tagged polygons grown, merged and split
//! by point-sweeping interactions on a 2D plane.

pub mod config;
pub mod geometry;
pub mod land;

pub use config::EngineConfig;
pub use geometry::{Point, Segment, Tag};
pub use land::{Board, Land, LandError, LandId, LandMap, LandResult};
