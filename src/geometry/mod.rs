pub mod centerline;
pub mod profile;

pub use centerline::{BuildCenterline, Centerline, BEND_ANGLE_EPSILON_DEG, TANGENT_EPSILON};
pub use profile::{mirror_triangles, Profile, ProfileCap};
