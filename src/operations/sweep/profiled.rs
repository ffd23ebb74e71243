use crate::error::Result;
use crate::geometry::{Centerline, Profile};
use crate::tessellation::{compute_vertex_normals, TriangleMesh};

use super::{Loft, Stitch};

/// Sweeps a profile along a centerline into a finished shell: loft, stitch
/// (profile loops and constrained-Delaunay caps), then smooth normals.
pub struct SweepProfile<'a> {
    profile: &'a Profile,
    centerline: &'a Centerline,
    closed_loop: bool,
    open_ended: bool,
}

impl<'a> SweepProfile<'a> {
    /// Creates a new `SweepProfile` operation for an open, capped path.
    #[must_use]
    pub fn new(profile: &'a Profile, centerline: &'a Centerline) -> Self {
        Self {
            profile,
            centerline,
            closed_loop: false,
            open_ended: false,
        }
    }

    /// Treats the centerline as a closed loop.
    #[must_use]
    pub fn closed_loop(mut self, closed_loop: bool) -> Self {
        self.closed_loop = closed_loop;
        self
    }

    /// Leaves both ends uncapped.
    #[must_use]
    pub fn open_ended(mut self, open_ended: bool) -> Self {
        self.open_ended = open_ended;
        self
    }

    /// Executes the sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if lofting, cap triangulation or stitching fails.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let raw = Loft::new(self.profile, self.centerline)
            .closed_loop(self.closed_loop)
            .open_ended(self.open_ended)
            .execute()?;
        let cap = self.profile.cap()?;

        let indices = Stitch::new(raw.ring_count, raw.profile_vertex_count)
            .closed_loop(self.closed_loop)
            .open_ended(self.open_ended)
            .loops(&raw.loop_sizes)
            .caps(&cap.triangles)
            .execute()?;
        let normals = compute_vertex_normals(&raw.vertices, &indices)?;

        Ok(TriangleMesh {
            vertices: raw.vertices,
            normals,
            indices,
        })
    }
}
