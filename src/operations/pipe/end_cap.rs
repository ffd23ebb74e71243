use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::{mirror_triangles, Centerline, Profile};
use crate::math::affine::{transform_direction, transform_point};
use crate::math::{Matrix4, Point3, Vector3};
use crate::operations::sweep::PathFrames;
use crate::tessellation::TriangleMesh;

/// Builds the two flat annuli that close the ends of a tube wall.
///
/// Each annulus is placed with the same ring transform as the wall's end ring,
/// so its boundary coincides with the shells' end rings. The first cap faces
/// back along the path, the last faces forward.
pub struct BuildEndCaps<'a> {
    outer_radius: f64,
    inner_radius: f64,
    segments: usize,
    centerline: &'a Centerline,
}

impl<'a> BuildEndCaps<'a> {
    /// Creates a new `BuildEndCaps` operation.
    #[must_use]
    pub fn new(
        outer_radius: f64,
        inner_radius: f64,
        segments: usize,
        centerline: &'a Centerline,
    ) -> Self {
        Self {
            outer_radius,
            inner_radius,
            segments,
            centerline,
        }
    }

    /// Executes the cap construction, returning `[first, last]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the annulus is invalid, its triangulation fails, or
    /// the centerline cannot be framed.
    pub fn execute(&self) -> Result<[TriangleMesh; 2]> {
        let annulus = Profile::annulus(self.outer_radius, self.inner_radius, self.segments)?;
        let cap = annulus.cap()?;
        let frames = PathFrames::compute(self.centerline, false)?;

        let last = frames.rings.len() - 1;
        let (Some(first_matrix), Some(last_matrix)) = (frames.matrix(0), frames.matrix(last))
        else {
            return Err(GeometryError::Degenerate("centerline has no end rings".into()).into());
        };

        let local: Vec<Point3> = cap.points.iter().map(|p| Point3::new(p.x, 0.0, p.y)).collect();
        let first = place(&local, mirror_triangles(&cap.triangles), &first_matrix, 1.0);
        let last = place(&local, cap.triangles, &last_matrix, -1.0);

        debug!(
            vertices = first.vertices.len(),
            triangles = first.triangle_count(),
            "built end caps"
        );
        Ok([first, last])
    }
}

/// Transforms the annulus onto a ring. `facing` is `1.0` for a normal along
/// local +Y (backwards along the path) and `-1.0` for local -Y.
fn place(local: &[Point3], indices: Vec<[u32; 3]>, matrix: &Matrix4, facing: f64) -> TriangleMesh {
    let normal = transform_direction(matrix, &(Vector3::y() * facing))
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros);
    TriangleMesh {
        vertices: local.iter().map(|p| transform_point(matrix, p)).collect(),
        normals: vec![normal; local.len()],
        indices,
    }
}
