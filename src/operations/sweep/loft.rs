use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Centerline, Profile};
use crate::math::affine::{ring_matrix, transform_point};
use crate::math::{Matrix4, Point3, Vector3, ANGLE_TOLERANCE, TOLERANCE};

/// Orientation of one ring along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingFrame {
    /// Centerline point the ring is centered on.
    pub origin: Point3,
    /// Unit direction the ring's plane is built perpendicular to before shearing.
    pub tangent: Vector3,
    /// Miter shear `tan(turn / 2)`; zero at open ends and reversal fallbacks.
    pub shift: f64,
    /// Signed turn angle (radians) about the bend-plane normal; zero at open ends.
    pub turn: f64,
}

/// Per-ring frames of a planar path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFrames {
    /// Unit normal of the bend plane.
    pub normal: Vector3,
    /// One frame per centerline point.
    pub rings: Vec<RingFrame>,
}

impl PathFrames {
    /// Computes the bend-plane normal and a mitered frame for every point.
    ///
    /// Open-path endpoints are perpendicular to their only segment. An interior
    /// turn of 180° has no bisector and falls back to the same perpendicular
    /// ring. Zero-length segments borrow the direction of the nearest
    /// non-degenerate segment.
    ///
    /// # Errors
    ///
    /// - [`OperationError::InvalidInput`] if an open path has fewer than 2
    ///   points or a closed path fewer than 3.
    /// - [`GeometryError::Degenerate`] if every segment has zero length or the
    ///   path leaves its bend plane.
    pub fn compute(centerline: &Centerline, closed_loop: bool) -> Result<Self> {
        let points = centerline.points();
        let n = points.len();
        let min = if closed_loop { 3 } else { 2 };
        if n < min {
            return Err(OperationError::InvalidInput(format!(
                "centerline needs at least {min} points, got {n}"
            ))
            .into());
        }

        let segment_count = if closed_loop { n } else { n - 1 };
        let segments = segment_directions(points, segment_count)?;
        let normal = plane_normal(&segments, closed_loop);

        let mut rings = Vec::with_capacity(n);
        for (i, origin) in points.iter().enumerate() {
            let is_end = !closed_loop && (i == 0 || i == n - 1);
            let frame = if is_end {
                let tangent = if i == 0 { segments[0] } else { segments[segment_count - 1] };
                RingFrame {
                    origin: *origin,
                    tangent: in_plane(&tangent, &normal)?,
                    shift: 0.0,
                    turn: 0.0,
                }
            } else {
                let d_in = segments[(i + segment_count - 1) % segment_count];
                let d_out = segments[i % segment_count];
                let turn = normal.dot(&d_in.cross(&d_out)).atan2(d_in.dot(&d_out));
                let shift = if turn.abs() > PI - ANGLE_TOLERANCE {
                    warn!(index = i, "path reverses on itself; using a perpendicular ring");
                    0.0
                } else {
                    (turn * 0.5).tan()
                };
                RingFrame {
                    origin: *origin,
                    tangent: in_plane(&d_out, &normal)?,
                    shift,
                    turn,
                }
            };
            rings.push(frame);
        }

        Ok(Self { normal, rings })
    }

    /// The ring transform at index `i`: shear, rotation onto the path, then
    /// translation. Returns `None` if `i` is out of range.
    #[must_use]
    pub fn matrix(&self, i: usize) -> Option<Matrix4> {
        self.rings
            .get(i)
            .map(|r| ring_matrix(&r.origin, &r.tangent, &self.normal, r.shift))
    }
}

/// Normalized segment directions, with zero-length segments replaced by the
/// nearest valid neighbour (earlier first).
fn segment_directions(points: &[Point3], count: usize) -> Result<Vec<Vector3>> {
    let n = points.len();
    let raw: Vec<Option<Vector3>> = (0..count)
        .map(|i| (points[(i + 1) % n] - points[i]).try_normalize(TOLERANCE))
        .collect();

    let Some(first_valid) = raw.iter().flatten().next().copied() else {
        return Err(GeometryError::Degenerate("centerline has no extent".into()).into());
    };

    let mut last = first_valid;
    let mut segments = Vec::with_capacity(count);
    for (i, dir) in raw.iter().enumerate() {
        if let Some(d) = dir {
            last = *d;
        } else {
            warn!(segment = i, "zero-length centerline segment");
        }
        segments.push(last);
    }
    Ok(segments)
}

/// The bend-plane normal: the strongest turn's axis, or for a straight path
/// the world axis least aligned with it, made orthogonal to the path.
fn plane_normal(segments: &[Vector3], closed_loop: bool) -> Vector3 {
    let pairs = if closed_loop { segments.len() } else { segments.len() - 1 };
    let mut best = Vector3::zeros();
    for k in 0..pairs {
        let cross = segments[k].cross(&segments[(k + 1) % segments.len()]);
        if cross.norm() > best.norm() {
            best = cross;
        }
    }
    if let Some(normal) = best.try_normalize(TOLERANCE) {
        return normal;
    }

    let t = segments[0];
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    let mut axis = axes[0];
    for candidate in &axes[1..] {
        if candidate.dot(&t).abs() < axis.dot(&t).abs() {
            axis = *candidate;
        }
    }
    (axis - t * t.dot(&axis)).normalize()
}

/// Projects a direction onto the bend plane.
fn in_plane(direction: &Vector3, normal: &Vector3) -> Result<Vector3> {
    let projected = direction - normal * normal.dot(direction);
    if (projected.norm() - 1.0).abs() > 1e-6 {
        return Err(GeometryError::Degenerate("centerline is not planar".into()).into());
    }
    Ok(projected.normalize())
}

/// Loft output before index stitching.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    /// Ring vertices (ring-major, profile-vertex-minor), followed by the first
    /// and last ring again when end profiles were requested.
    pub vertices: Vec<Point3>,
    /// Number of rings (centerline points).
    pub ring_count: usize,
    /// Vertices per ring.
    pub profile_vertex_count: usize,
    /// Sizes of the profile loops, in vertex order.
    pub loop_sizes: Vec<usize>,
    /// Whether the path wraps from its last point to its first.
    pub closed_loop: bool,
    /// Whether the two end-profile blocks were appended.
    pub end_profiles: bool,
}

/// Sweeps a profile along a centerline, one mitered ring per point.
pub struct Loft<'a> {
    profile: &'a Profile,
    centerline: &'a Centerline,
    closed_loop: bool,
    open_ended: bool,
}

impl<'a> Loft<'a> {
    /// Creates a new `Loft` operation for an open, capped path.
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

    /// Skips the end-profile blocks used for caps.
    #[must_use]
    pub fn open_ended(mut self, open_ended: bool) -> Self {
        self.open_ended = open_ended;
        self
    }

    /// Executes the loft.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is too short or degenerate (see
    /// [`PathFrames::compute`]).
    pub fn execute(&self) -> Result<RawMesh> {
        let frames = PathFrames::compute(self.centerline, self.closed_loop)?;
        let local: Vec<Point3> = self
            .profile
            .vertices()
            .iter()
            .map(|p| Point3::new(p.x, 0.0, p.y))
            .collect();
        let per_ring = local.len();
        let ring_count = frames.rings.len();
        let end_profiles = !self.closed_loop && !self.open_ended;

        let mut vertices = Vec::with_capacity(per_ring * (ring_count + 2));
        for i in 0..ring_count {
            let Some(m) = frames.matrix(i) else { break };
            vertices.extend(local.iter().map(|p| transform_point(&m, p)));
        }
        if end_profiles {
            let last = (ring_count - 1) * per_ring;
            vertices.extend_from_within(0..per_ring);
            vertices.extend_from_within(last..last + per_ring);
        }

        debug!(
            rings = ring_count,
            profile_vertices = per_ring,
            vertices = vertices.len(),
            end_profiles,
            "lofted profile"
        );

        Ok(RawMesh {
            vertices,
            ring_count,
            profile_vertex_count: per_ring,
            loop_sizes: self.profile.loop_sizes(),
            closed_loop: self.closed_loop,
            end_profiles,
        })
    }
}
