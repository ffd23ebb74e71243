use crate::error::{check_range, GeometryError, OperationError, Result};
use crate::math::polygon_2d::{
    circle_points, has_repeated_vertex, point_in_polygon, signed_area_2d,
};
use crate::math::{Point2, TOLERANCE};
use crate::tessellation::triangulate_profile;

/// A 2D cross-section swept along a centerline.
///
/// The outer boundary winds counter-clockwise and every hole clockwise. The
/// outer boundary may be empty, in which case the profile is a *bore*: only
/// its hole loops are swept and there is no region to cap.
///
/// Profile vertices are numbered outer loop first, then each hole in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    outer: Vec<Point2>,
    holes: Vec<Vec<Point2>>,
}

impl Profile {
    /// Creates a profile, normalizing loop winding.
    ///
    /// # Errors
    ///
    /// - [`OperationError::InvalidInput`] if there is no loop at all, a loop has
    ///   fewer than 3 points or a non-finite coordinate, or a hole is not inside
    ///   a non-empty outer boundary.
    /// - [`GeometryError::Degenerate`] if a loop has zero area or repeats a
    ///   vertex.
    pub fn new(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Result<Self> {
        if outer.is_empty() && holes.is_empty() {
            return Err(OperationError::InvalidInput("profile has no loops".into()).into());
        }
        if !outer.is_empty() {
            validate_loop("outer boundary", &outer)?;
        }
        for hole in &holes {
            validate_loop("hole", hole)?;
            if !outer.is_empty() && !hole.iter().all(|p| point_in_polygon(p, &outer)) {
                return Err(
                    OperationError::InvalidInput("hole is not inside the outer boundary".into())
                        .into(),
                );
            }
        }

        let outer = wind(outer, true);
        let holes = holes.into_iter().map(|h| wind(h, false)).collect();
        Ok(Self { outer, holes })
    }

    /// A filled circular disc.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive or `segments < 3`.
    pub fn disc(radius: f64, segments: usize) -> Result<Self> {
        check_circle(radius, segments)?;
        Self::new(circle_points(radius, segments), Vec::new())
    }

    /// A flat ring between `outer_radius` and `inner_radius`.
    ///
    /// Both circles are sampled at the same angles, so the annulus shares its
    /// boundary positions with [`Profile::bore`] loops of the same radii.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < inner_radius < outer_radius` and
    /// `segments >= 3`.
    pub fn annulus(outer_radius: f64, inner_radius: f64, segments: usize) -> Result<Self> {
        check_circle(outer_radius, segments)?;
        check_range("inner_radius", inner_radius, f64::MIN_POSITIVE, outer_radius)?;
        if inner_radius >= outer_radius {
            return Err(OperationError::InvalidInput(
                "annulus inner radius must be smaller than its outer radius".into(),
            )
            .into());
        }
        Self::new(
            circle_points(outer_radius, segments),
            vec![circle_points(inner_radius, segments)],
        )
    }

    /// A bore: a single clockwise hole loop with no outer boundary.
    ///
    /// Sweeping a bore yields one cylindrical surface facing the path axis.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive or `segments < 3`.
    pub fn bore(radius: f64, segments: usize) -> Result<Self> {
        check_circle(radius, segments)?;
        Self::new(Vec::new(), vec![circle_points(radius, segments)])
    }

    /// The outer boundary (counter-clockwise, possibly empty).
    #[must_use]
    pub fn outer(&self) -> &[Point2] {
        &self.outer
    }

    /// The hole loops (each clockwise).
    #[must_use]
    pub fn holes(&self) -> &[Vec<Point2>] {
        &self.holes
    }

    /// All loop vertices: outer boundary first, then each hole.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point2> {
        let mut all = Vec::with_capacity(self.vertex_count());
        all.extend_from_slice(&self.outer);
        for hole in &self.holes {
            all.extend_from_slice(hole);
        }
        all
    }

    /// Total number of loop vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Sizes of the non-empty loops, in vertex order.
    #[must_use]
    pub fn loop_sizes(&self) -> Vec<usize> {
        std::iter::once(self.outer.len())
            .chain(self.holes.iter().map(Vec::len))
            .filter(|&n| n > 0)
            .collect()
    }

    /// Triangulates the capped region (empty for a bore).
    ///
    /// # Errors
    ///
    /// Returns an error if the constrained triangulation fails.
    pub fn cap(&self) -> Result<ProfileCap> {
        Ok(ProfileCap {
            points: self.vertices(),
            triangles: triangulate_profile(&self.outer, &self.holes)?,
        })
    }
}

/// A profile's vertices with a counter-clockwise triangulation of its region.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCap {
    /// Profile vertices in profile order.
    pub points: Vec<Point2>,
    /// Triangles indexing `points`.
    pub triangles: Vec<[u32; 3]>,
}

impl ProfileCap {
    /// Reflects the cap across its v axis and reverses every triangle.
    ///
    /// Vertex order is preserved, so the mirrored triangles still index the
    /// same profile vertices but face the opposite way once swept.
    #[must_use]
    pub fn mirrored(&self) -> ProfileCap {
        ProfileCap {
            points: self.points.iter().map(|p| Point2::new(-p.x, p.y)).collect(),
            triangles: mirror_triangles(&self.triangles),
        }
    }
}

/// Swaps the second and third index of every triangle.
#[must_use]
pub fn mirror_triangles(triangles: &[[u32; 3]]) -> Vec<[u32; 3]> {
    triangles.iter().map(|&[a, b, c]| [a, c, b]).collect()
}

fn check_circle(radius: f64, segments: usize) -> Result<()> {
    check_range("radius", radius, f64::MIN_POSITIVE, f64::MAX)?;
    if segments < 3 {
        return Err(OperationError::InvalidInput(format!(
            "circle needs at least 3 segments, got {segments}"
        ))
        .into());
    }
    Ok(())
}

fn validate_loop(name: &str, points: &[Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(OperationError::InvalidInput(format!(
            "{name} needs at least 3 points, got {}",
            points.len()
        ))
        .into());
    }
    if !points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        return Err(OperationError::InvalidInput(format!("{name} has a non-finite point")).into());
    }
    if has_repeated_vertex(points) {
        return Err(GeometryError::Degenerate(format!("{name} repeats a vertex")).into());
    }
    if signed_area_2d(points).abs() < TOLERANCE {
        return Err(GeometryError::Degenerate(format!("{name} has zero area")).into());
    }
    Ok(())
}

fn wind(mut points: Vec<Point2>, ccw: bool) -> Vec<Point2> {
    if !points.is_empty() && (signed_area_2d(&points) > 0.0) != ccw {
        points.reverse();
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::is_ccw;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn new_normalizes_winding() {
        let cw_square = vec![p(0.0, 0.0), p(0.0, 4.0), p(4.0, 4.0), p(4.0, 0.0)];
        let ccw_hole = vec![p(1.0, 1.0), p(2.0, 1.0), p(2.0, 2.0), p(1.0, 2.0)];
        let profile = Profile::new(cw_square, vec![ccw_hole]).unwrap();
        assert!(is_ccw(profile.outer()));
        assert!(!is_ccw(&profile.holes()[0]));
    }

    #[test]
    fn disc_is_single_loop() {
        let disc = Profile::disc(1.0, 16).unwrap();
        assert_eq!(disc.vertex_count(), 16);
        assert_eq!(disc.loop_sizes(), vec![16]);
        assert_eq!(disc.cap().unwrap().triangles.len(), 14);
    }

    #[test]
    fn annulus_cap_covers_ring_area() {
        let ring = Profile::annulus(2.0, 1.0, 64).unwrap();
        assert_eq!(ring.loop_sizes(), vec![64, 64]);
        let cap = ring.cap().unwrap();
        let area: f64 = cap
            .triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (cap.points[a as usize], cap.points[b as usize], cap.points[c as usize]);
                0.5 * ((b - a).x * (c - a).y - (b - a).y * (c - a).x)
            })
            .sum();
        let outer = signed_area_2d(&circle_points(2.0, 64));
        let inner = signed_area_2d(&circle_points(1.0, 64));
        assert_abs_diff_eq!(area, outer - inner, epsilon = 1e-9);
    }

    #[test]
    fn bore_has_no_cap_triangles() {
        let bore = Profile::bore(1.5, 20).unwrap();
        assert!(bore.outer().is_empty());
        assert_eq!(bore.loop_sizes(), vec![20]);
        assert!(bore.cap().unwrap().triangles.is_empty());
    }

    #[test]
    fn bore_shares_positions_with_annulus() {
        let bore = Profile::bore(1.0, 12).unwrap();
        let ring = Profile::annulus(2.0, 1.0, 12).unwrap();
        let mut a = bore.holes()[0].clone();
        let mut b = ring.holes()[0].clone();
        let key = |q: &Point2| (q.x.to_bits(), q.y.to_bits());
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }

    #[test]
    fn mirrored_cap_flips_x_and_winding() {
        let cap = Profile::disc(1.0, 8).unwrap().cap().unwrap();
        let mirrored = cap.mirrored();
        assert_eq!(mirrored.points.len(), cap.points.len());
        assert_abs_diff_eq!(mirrored.points[0].x, -cap.points[0].x);
        for (m, c) in mirrored.triangles.iter().zip(&cap.triangles) {
            assert_eq!(*m, [c[0], c[2], c[1]]);
        }
    }

    // ── Error cases ────────────────────────────────────────────

    #[test]
    fn invalid_profiles_are_rejected() {
        assert!(Profile::new(Vec::new(), Vec::new()).is_err());
        assert!(Profile::new(vec![p(0.0, 0.0), p(1.0, 0.0)], Vec::new()).is_err());
        assert!(Profile::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)], Vec::new()).is_err());
        assert!(Profile::disc(0.0, 8).is_err());
        assert!(Profile::disc(1.0, 2).is_err());
        assert!(Profile::annulus(1.0, 1.0, 8).is_err());
        assert!(Profile::annulus(1.0, 2.0, 8).is_err());
    }

    #[test]
    fn hole_outside_outer_is_rejected() {
        let outer = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let hole = vec![p(5.0, 5.0), p(6.0, 5.0), p(6.0, 6.0)];
        assert!(Profile::new(outer, vec![hole]).is_err());
    }
}
