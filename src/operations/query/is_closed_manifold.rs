use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::math::Point3;
use crate::tessellation::TriangleMesh;

/// Grid step positions are welded on before edges are compared.
const WELD_STEP: f64 = 1e-9;

/// Checks that a triangle mesh is a closed, consistently oriented 2-manifold.
///
/// Vertices at the same position (to within [`WELD_STEP`]) are treated as one,
/// so shells that meet along duplicated rings still count as closed. Every
/// undirected edge must be shared by exactly two triangles, and every directed
/// edge may appear at most once.
pub struct IsClosedManifold<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> IsClosedManifold<'a> {
    /// Creates a new `IsClosedManifold` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the check. An empty mesh is not closed.
    #[must_use]
    pub fn execute(&self) -> bool {
        if self.mesh.indices.is_empty() {
            return false;
        }

        let mut welded: HashMap<[i64; 3], usize> = HashMap::new();
        let mut ids = Vec::with_capacity(self.mesh.vertices.len());
        for p in &self.mesh.vertices {
            let next = welded.len();
            ids.push(*welded.entry(weld_key(p)).or_insert(next));
        }

        let mut directed: HashSet<(usize, usize)> = HashSet::new();
        let mut undirected: HashMap<(usize, usize), u32> = HashMap::new();
        for tri in &self.mesh.indices {
            let Some(v) = tri
                .iter()
                .map(|&i| ids.get(i as usize).copied())
                .collect::<Option<Vec<_>>>()
            else {
                return false;
            };
            if v[0] == v[1] || v[1] == v[2] || v[2] == v[0] {
                debug!(triangle = ?tri, "degenerate triangle");
                return false;
            }
            for k in 0..3 {
                let (a, b) = (v[k], v[(k + 1) % 3]);
                if !directed.insert((a, b)) {
                    debug!(edge = ?(a, b), "directed edge used twice");
                    return false;
                }
                *undirected.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        let open = undirected.values().filter(|&&count| count != 2).count();
        if open > 0 {
            debug!(open_edges = open, "mesh is not closed");
        }
        open == 0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn weld_key(p: &Point3) -> [i64; 3] {
    [
        (p.x / WELD_STEP).round() as i64,
        (p.y / WELD_STEP).round() as i64,
        (p.z / WELD_STEP).round() as i64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn tetrahedron() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            normals: vec![Vector3::zeros(); 4],
            indices: vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        }
    }

    #[test]
    fn tetrahedron_is_closed() {
        assert!(IsClosedManifold::new(&tetrahedron()).execute());
    }

    #[test]
    fn missing_face_is_open() {
        let mut mesh = tetrahedron();
        mesh.indices.pop();
        assert!(!IsClosedManifold::new(&mesh).execute());
    }

    #[test]
    fn flipped_face_is_inconsistent() {
        let mut mesh = tetrahedron();
        mesh.indices[3] = [0, 2, 3];
        assert!(!IsClosedManifold::new(&mesh).execute());
    }

    #[test]
    fn duplicated_positions_are_welded() {
        let mut mesh = tetrahedron();
        // Re-reference the last face through a copy of vertex 0.
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.normals.push(Vector3::zeros());
        mesh.indices[3] = [4, 3, 2];
        assert!(IsClosedManifold::new(&mesh).execute());
    }

    #[test]
    fn empty_and_out_of_range_meshes_are_rejected() {
        assert!(!IsClosedManifold::new(&TriangleMesh::default()).execute());
        let mut mesh = tetrahedron();
        mesh.indices[0] = [0, 2, 9];
        assert!(!IsClosedManifold::new(&mesh).execute());
    }
}
