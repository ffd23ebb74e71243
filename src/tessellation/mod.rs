mod normals;
mod triangulate_profile;

pub use normals::compute_vertex_normals;
pub use triangulate_profile::triangulate_profile;

use crate::error::{Result, TessellationError};
use crate::math::{Point3, Vector3};

/// A triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals, parallel to `vertices`.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple is a counter-clockwise triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends another mesh, offsetting its indices past this mesh's vertices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Returns a copy with every triangle's winding flipped and normals negated.
    #[must_use]
    pub fn reversed(&self) -> TriangleMesh {
        TriangleMesh {
            vertices: self.vertices.clone(),
            normals: self.normals.iter().map(|n| -n).collect(),
            indices: self.indices.iter().map(|&[a, b, c]| [a, c, b]).collect(),
        }
    }

    /// Concatenates several meshes into one.
    #[must_use]
    pub fn concat<'a>(meshes: impl IntoIterator<Item = &'a TriangleMesh>) -> TriangleMesh {
        let mut combined = TriangleMesh::default();
        for mesh in meshes {
            combined.merge(mesh);
        }
        combined
    }
}

/// Converts a vertex index into a `u32` buffer index.
///
/// # Errors
///
/// Returns [`TessellationError::Failed`] if the index does not fit.
pub(crate) fn to_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| {
        TessellationError::Failed(format!("vertex index {index} exceeds u32 range")).into()
    })
}
