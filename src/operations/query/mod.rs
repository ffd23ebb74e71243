mod bounding_box;
mod is_closed_manifold;

pub use bounding_box::{Aabb, BoundingBox};
pub use is_closed_manifold::IsClosedManifold;
