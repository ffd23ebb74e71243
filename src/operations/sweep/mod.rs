mod loft;
mod profiled;
mod stitch;

pub use loft::{Loft, PathFrames, RawMesh, RingFrame};
pub use profiled::SweepProfile;
pub use stitch::Stitch;
