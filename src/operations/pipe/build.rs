use tracing::debug;

use crate::error::Result;
use crate::geometry::{BuildCenterline, Centerline, Profile};
use crate::params::PipeParams;
use crate::tessellation::TriangleMesh;

use super::{BuildEndCaps, BuildWallMesh};

/// A built tube: the wall mesh with its two end caps as children.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeModel {
    /// Parameters the model was built from.
    pub params: PipeParams,
    /// Centerline the wall was swept along, in sweep order.
    pub centerline: Centerline,
    /// Inner and outer shells.
    pub wall: TriangleMesh,
    /// Annular caps at the first and last ring.
    pub end_caps: [TriangleMesh; 2],
}

impl PipeModel {
    /// Flattens the wall and both caps into one mesh.
    #[must_use]
    pub fn to_mesh(&self) -> TriangleMesh {
        TriangleMesh::concat(std::iter::once(&self.wall).chain(&self.end_caps))
    }

    /// Total triangle count of the wall and caps.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.wall.triangle_count() + self.end_caps.iter().map(TriangleMesh::triangle_count).sum::<usize>()
    }
}

/// Builds a complete tube from its parameters.
pub struct BuildPipe<'a> {
    params: &'a PipeParams,
}

impl<'a> BuildPipe<'a> {
    /// Creates a new `BuildPipe` operation.
    #[must_use]
    pub fn new(params: &'a PipeParams) -> Self {
        Self { params }
    }

    /// Executes the build.
    ///
    /// The centerline is built from the origin out and reversed once, so the
    /// sweep starts at the tangent-B end.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or any stage fails.
    pub fn execute(&self) -> Result<PipeModel> {
        let p = self.params;
        p.validate()?;

        let centerline = BuildCenterline::new(
            p.tangent_a,
            p.tangent_b,
            p.bend_radius,
            p.bend_angle_deg,
            p.arc_resolution,
        )
        .execute()?
        .reversed();

        let outer = Profile::bore(p.outer_radius, p.profile_segments)?;
        let inner = Profile::bore(p.inner_radius, p.profile_segments)?;
        let wall = BuildWallMesh::new(&outer, &inner, &centerline).execute()?;
        let end_caps = BuildEndCaps::new(p.outer_radius, p.inner_radius, p.profile_segments, &centerline)
            .execute()?;

        let model = PipeModel {
            params: p.clone(),
            centerline,
            wall,
            end_caps,
        };
        debug!(
            rings = model.centerline.len(),
            triangles = model.triangle_count(),
            "built pipe"
        );
        Ok(model)
    }
}
