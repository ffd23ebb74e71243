use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3};
use crate::tessellation::TriangleMesh;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Computes the axis-aligned bounding box of the vertices a mesh's triangles
/// reference.
pub struct BoundingBox<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the mesh has no triangles.
    pub fn execute(&self) -> Result<Aabb> {
        let mut referenced = self
            .mesh
            .indices
            .iter()
            .flatten()
            .filter_map(|&i| self.mesh.vertices.get(i as usize));

        let Some(first) = referenced.next() else {
            return Err(OperationError::InvalidInput("bounding box of an empty mesh".into()).into());
        };
        let mut aabb = Aabb {
            min: *first,
            max: *first,
        };
        for p in referenced {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Ok(aabb)
    }
}
