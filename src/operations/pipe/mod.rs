mod build;
mod end_cap;
mod wall;

pub use build::{BuildPipe, PipeModel};
pub use end_cap::BuildEndCaps;
pub use wall::BuildWallMesh;
