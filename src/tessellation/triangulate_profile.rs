use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::Point2;

use super::to_index;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates the region inside `outer` and outside every hole.
///
/// Indices refer to the concatenated vertex order `outer ++ holes[0] ++ ...`.
/// Every returned triangle winds counter-clockwise. An empty `outer` bounds no
/// region, so the result is empty.
///
/// # Errors
///
/// Returns [`TessellationError::Failed`] if a loop has fewer than 3 points or
/// the constrained Delaunay insertion fails.
pub fn triangulate_profile(outer: &[Point2], holes: &[Vec<Point2>]) -> Result<Vec<[u32; 3]>> {
    if outer.is_empty() {
        return Ok(Vec::new());
    }

    let mut cdt = Cdt::new();
    let mut profile_index: HashMap<usize, u32> = HashMap::new();
    let mut base = 0;
    for ring in std::iter::once(outer).chain(holes.iter().map(Vec::as_slice)) {
        insert_constraint_loop(&mut cdt, ring, base, &mut profile_index)?;
        base += ring.len();
    }

    let interior = classify_interior_faces(&cdt);

    let mut triangles = Vec::with_capacity(interior.len());
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let verts = face.vertices();
        let mut tri = [0u32; 3];
        for (slot, vh) in tri.iter_mut().zip(verts.iter()) {
            *slot = *profile_index.get(&vh.fix().index()).ok_or_else(|| {
                TessellationError::Failed("CDT face references an unknown vertex".into())
            })?;
        }
        let [pa, pb, pc] = verts.map(|vh| vh.position());
        let cross = (pb.x - pa.x) * (pc.y - pa.y) - (pb.y - pa.y) * (pc.x - pa.x);
        if cross < 0.0 {
            tri.swap(1, 2);
        }
        triangles.push(tri);
    }

    Ok(triangles)
}

/// Inserts a closed loop as constraint edges, recording the profile index of
/// every CDT vertex it creates.
fn insert_constraint_loop(
    cdt: &mut Cdt,
    points: &[Point2],
    base: usize,
    profile_index: &mut HashMap<usize, u32>,
) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for (i, pt) in points.iter().enumerate() {
        let h = cdt
            .insert(SpadePoint2::new(pt.x, pt.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        // A coincident point reuses the handle of its first occurrence.
        if !profile_index.contains_key(&h.index()) {
            profile_index.insert(h.index(), to_index(base + i)?);
        }
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Flood-fills from the outer face; each constraint edge crossed increments
/// the depth, and odd depth marks a face as interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let next_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, next_depth);
            if next_depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), next_depth));
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::circle_points;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn area(points: &[Point2], tris: &[[u32; 3]]) -> f64 {
        tris.iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (points[a as usize], points[b as usize], points[c as usize]);
                0.5 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x))
            })
            .sum()
    }

    #[test]
    fn square_produces_2_ccw_triangles() {
        let square = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let tris = triangulate_profile(&square, &[]).unwrap();
        assert_eq!(tris.len(), 2);
        assert_abs_diff_eq!(area(&square, &tris), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn convex_polygon_has_n_minus_2_triangles() {
        let circle = circle_points(1.0, 24);
        let tris = triangulate_profile(&circle, &[]).unwrap();
        assert_eq!(tris.len(), 22);
    }

    #[test]
    fn l_shape_concave_tessellates() {
        let l_shape = vec![
            p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0),
            p(2.0, 2.0), p(2.0, 4.0), p(0.0, 4.0),
        ];
        let tris = triangulate_profile(&l_shape, &[]).unwrap();
        assert_eq!(tris.len(), 4);
        assert_abs_diff_eq!(area(&l_shape, &tris), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_is_excluded_and_indices_follow_hole_offset() {
        let outer = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let hole = vec![p(2.0, 2.0), p(2.0, 8.0), p(8.0, 8.0), p(8.0, 2.0)];
        let tris = triangulate_profile(&outer, &[hole.clone()]).unwrap();

        let mut all = outer.clone();
        all.extend(hole);
        assert_abs_diff_eq!(area(&all, &tris), 100.0 - 36.0, epsilon = 1e-9);
        assert!(tris.iter().flatten().all(|&i| i < 8));
        assert!(tris.iter().flatten().any(|&i| i >= 4));
    }

    #[test]
    fn empty_outer_has_no_triangles() {
        let tris = triangulate_profile(&[], &[circle_points(1.0, 8)]).unwrap();
        assert!(tris.is_empty());
    }

    #[test]
    fn too_short_loop_is_rejected() {
        assert!(triangulate_profile(&[p(0.0, 0.0), p(1.0, 0.0)], &[]).is_err());
    }
}
