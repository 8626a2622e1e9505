//! Plane geometry: point and segment types, orientation and intersection
//! tests, and the convex hull used to seed new lands.

pub mod primitives;
pub use primitives::*;

pub mod utils_2d;
pub use utils_2d::{distance, orientation, Orientation};

pub mod intersection;
pub use intersection::*;

pub mod hull;
pub use hull::convex_hull;
