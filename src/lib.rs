pub mod context;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod measurements;
pub mod operations;
pub mod params;
pub mod tessellation;

pub use context::{PipeContext, SubscriptionId};
pub use error::{PipeError, Result};
pub use material::{Material, OpticalParams};
pub use operations::pipe::{BuildPipe, PipeModel};
pub use params::PipeParams;
