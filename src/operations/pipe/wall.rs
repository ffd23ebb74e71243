use tracing::debug;

use crate::error::Result;
use crate::geometry::{Centerline, Profile};
use crate::operations::sweep::SweepProfile;
use crate::tessellation::TriangleMesh;

/// Builds a tube wall from two bore sweeps along the same centerline.
///
/// The inner shell faces the bore axis as swept. The outer shell is reversed so
/// it faces away from the axis. The shells are concatenated inner first; the
/// annular ends are built separately by
/// [`BuildEndCaps`](super::BuildEndCaps).
pub struct BuildWallMesh<'a> {
    outer: &'a Profile,
    inner: &'a Profile,
    centerline: &'a Centerline,
}

impl<'a> BuildWallMesh<'a> {
    /// Creates a new `BuildWallMesh` operation.
    #[must_use]
    pub fn new(outer: &'a Profile, inner: &'a Profile, centerline: &'a Centerline) -> Self {
        Self {
            outer,
            inner,
            centerline,
        }
    }

    /// Executes the wall construction.
    ///
    /// # Errors
    ///
    /// Returns an error if either sweep fails.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let inner = SweepProfile::new(self.inner, self.centerline).execute()?;
        let outer = SweepProfile::new(self.outer, self.centerline)
            .execute()?
            .reversed();

        let wall = TriangleMesh::concat([&inner, &outer]);
        debug!(
            inner_triangles = inner.triangle_count(),
            outer_triangles = outer.triangle_count(),
            vertices = wall.vertices.len(),
            "built wall mesh"
        );
        Ok(wall)
    }
}
