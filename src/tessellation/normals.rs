use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Computes smooth per-vertex normals as the area-weighted average of the
/// adjacent face normals.
///
/// Faces are accumulated in index-buffer order so repeated calls are
/// bit-identical. Vertices not referenced by any triangle get a zero normal.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] if a triangle references a vertex
/// outside `vertices`.
pub fn compute_vertex_normals(vertices: &[Point3], indices: &[[u32; 3]]) -> Result<Vec<Vector3>> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];

    for (t, tri) in indices.iter().enumerate() {
        let [a, b, c] = tri.map(|i| i as usize);
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            return Err(OperationError::InvalidInput(format!(
                "triangle {t} references a vertex outside 0..{}",
                vertices.len()
            ))
            .into());
        }
        // Unnormalized cross product: its length is twice the triangle area.
        let face = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in &mut normals {
        *n = n.try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros);
    }

    Ok(normals)
}
