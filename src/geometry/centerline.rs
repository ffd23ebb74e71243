use tracing::debug;

use crate::error::{check_range, OperationError, Result};
use crate::math::Point3;

/// Added to the bend angle (degrees) so a zero bend never yields coincident
/// arc samples.
pub const BEND_ANGLE_EPSILON_DEG: f64 = 0.01;

/// Added to the tangent lengths so a zero tangent never yields a zero-length
/// segment.
pub const TANGENT_EPSILON: f64 = 0.001;

/// An ordered, open sequence of points describing a pipe's path.
#[derive(Debug, Clone, PartialEq)]
pub struct Centerline {
    points: Vec<Point3>,
}

impl Centerline {
    /// Creates a centerline from points.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `points` is empty or holds a
    /// non-finite coordinate.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.is_empty() {
            return Err(OperationError::InvalidInput("centerline needs at least one point".into()).into());
        }
        if let Some(i) = points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(OperationError::InvalidInput(format!(
                "centerline point {i} has a non-finite coordinate"
            ))
            .into());
        }
        Ok(Self { points })
    }

    /// The path points in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a centerline holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the same path traversed backwards.
    ///
    /// The pipe builder applies this exactly once between building and
    /// lofting: ring 0 then sits at the tangent-B end and the bend-plane normal
    /// takes the sign the wall winding relies on.
    #[must_use]
    pub fn reversed(&self) -> Centerline {
        Centerline {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Total polyline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Builds the straight-arc-straight centerline of a single-bend pipe.
///
/// The path starts at the origin, runs along +X for tangent A, bends toward +Z
/// around a circle of `bend_radius`, and ends with tangent B along
/// `(cos(bend), 0, sin(bend))`. It has `arc_resolution + 3` points.
pub struct BuildCenterline {
    tangent_a: f64,
    tangent_b: f64,
    bend_radius: f64,
    bend_angle_deg: f64,
    arc_resolution: u32,
}

impl BuildCenterline {
    /// Creates a new `BuildCenterline` operation.
    ///
    /// * `bend_angle_deg` - Bend angle in degrees, in `[0, 180]`.
    /// * `arc_resolution` - Number of arc subdivisions (at least 1).
    #[must_use]
    pub fn new(
        tangent_a: f64,
        tangent_b: f64,
        bend_radius: f64,
        bend_angle_deg: f64,
        arc_resolution: u32,
    ) -> Self {
        Self {
            tangent_a,
            tangent_b,
            bend_radius,
            bend_angle_deg,
            arc_resolution,
        }
    }

    /// Executes the construction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::ParameterOutOfRange`] for negative
    /// tangents, a non-positive radius, an angle outside `[0, 180]`, a zero arc
    /// resolution, or any non-finite input.
    pub fn execute(&self) -> Result<Centerline> {
        check_range("tangent_a", self.tangent_a, 0.0, f64::MAX)?;
        check_range("tangent_b", self.tangent_b, 0.0, f64::MAX)?;
        check_range("bend_radius", self.bend_radius, f64::MIN_POSITIVE, f64::MAX)?;
        check_range("bend_angle_deg", self.bend_angle_deg, 0.0, 180.0)?;
        check_range("arc_resolution", f64::from(self.arc_resolution), 1.0, f64::from(u32::MAX))?;

        let bend = (self.bend_angle_deg + BEND_ANGLE_EPSILON_DEG).to_radians();
        let tangent_a = self.tangent_a + TANGENT_EPSILON;
        let tangent_b = self.tangent_b + TANGENT_EPSILON;
        let radius = self.bend_radius;
        let steps = f64::from(self.arc_resolution);

        let mut points = Vec::with_capacity(self.arc_resolution as usize + 3);
        points.push(Point3::origin());
        for i in 0..=self.arc_resolution {
            let angle = f64::from(i) / steps * bend;
            points.push(Point3::new(
                tangent_a + radius * angle.sin(),
                0.0,
                radius - radius * angle.cos(),
            ));
        }
        let bend_end = points[points.len() - 1];
        points.push(Point3::new(
            bend_end.x + tangent_b * bend.cos(),
            0.0,
            bend_end.z + tangent_b * bend.sin(),
        ));

        debug!(
            points = points.len(),
            bend_angle_deg = self.bend_angle_deg,
            "built centerline"
        );
        Centerline::new(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn build(ta: f64, tb: f64, r: f64, deg: f64, res: u32) -> Result<Centerline> {
        BuildCenterline::new(ta, tb, r, deg, res).execute()
    }

    // ── Shape ──────────────────────────────────────────────────

    #[test]
    fn point_count_and_origin() {
        let line = build(2.0, 2.0, 3.0, 88.0, 35).unwrap();
        assert_eq!(line.len(), 38);
        assert_eq!(line.points()[0], Point3::origin());
        assert!(!line.is_empty());
    }

    #[test]
    fn cumulative_length_strictly_increases() {
        for &deg in &[0.0, 1.0, 45.0, 88.0, 179.0, 180.0] {
            for &(ta, tb) in &[(0.0, 0.0), (2.0, 0.0), (0.0, 5.0), (15.0, 15.0)] {
                let line = build(ta, tb, 3.0, deg, 12).unwrap();
                assert_eq!(line.len(), 15);
                for w in line.points().windows(2) {
                    assert!((w[1] - w[0]).norm() > 0.0, "coincident points at {deg}°");
                }
            }
        }
    }

    #[test]
    fn arc_is_tangent_to_first_segment() {
        let line = build(2.0, 2.0, 3.0, 90.0, 4).unwrap();
        let pts = line.points();
        assert_relative_eq!(pts[1].x, 2.0 + TANGENT_EPSILON);
        assert_abs_diff_eq!(pts[1].z, 0.0);
        // Every arc sample lies on the bend circle.
        let center = Point3::new(2.0 + TANGENT_EPSILON, 0.0, 3.0);
        for p in &pts[1..pts.len() - 1] {
            assert_relative_eq!((p - center).norm(), 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn final_tangent_follows_bend_direction() {
        let line = build(2.0, 4.0, 3.0, 60.0, 8).unwrap();
        let pts = line.points();
        let last = pts[pts.len() - 1] - pts[pts.len() - 2];
        let bend = (60.0 + BEND_ANGLE_EPSILON_DEG).to_radians();
        assert_relative_eq!(last.norm(), 4.0 + TANGENT_EPSILON, epsilon = 1e-12);
        assert_relative_eq!(last.x / last.norm(), bend.cos(), epsilon = 1e-12);
        assert_relative_eq!(last.z / last.norm(), bend.sin(), epsilon = 1e-12);
    }

    #[test]
    fn z_extent_matches_bend_geometry() {
        let line = build(2.0, 2.0, 3.0, 88.0, 35).unwrap();
        let max_z = line.points().iter().map(|p| p.z).fold(f64::MIN, f64::max);
        let min_z = line.points().iter().map(|p| p.z).fold(f64::MAX, f64::min);
        let bend = 88.0_f64.to_radians();
        let expected = 3.0 * (1.0 - bend.cos()) + 2.0 * bend.sin();
        assert_relative_eq!(max_z - min_z, expected, max_relative = 0.05);
    }

    #[test]
    fn reversed_swaps_ends() {
        let line = build(1.0, 1.0, 1.0, 30.0, 3).unwrap();
        let rev = line.reversed();
        assert_eq!(rev.points()[0], line.points()[line.len() - 1]);
        assert_eq!(rev.reversed(), line);
        assert_relative_eq!(rev.length(), line.length());
    }

    // ── Error cases ────────────────────────────────────────────

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(build(-1.0, 2.0, 3.0, 88.0, 35).is_err());
        assert!(build(2.0, -0.1, 3.0, 88.0, 35).is_err());
        assert!(build(2.0, 2.0, 0.0, 88.0, 35).is_err());
        assert!(build(2.0, 2.0, 3.0, 180.5, 35).is_err());
        assert!(build(2.0, 2.0, 3.0, -1.0, 35).is_err());
        assert!(build(2.0, 2.0, 3.0, 88.0, 0).is_err());
        assert!(build(f64::NAN, 2.0, 3.0, 88.0, 35).is_err());
    }

    #[test]
    fn empty_centerline_is_rejected() {
        assert!(Centerline::new(Vec::new()).is_err());
        assert!(Centerline::new(vec![Point3::new(f64::NAN, 0.0, 0.0)]).is_err());
    }
}
