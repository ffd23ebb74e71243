//! Dimension annotations for a tube, as plain data.
//!
//! Positions are in the centerline's build frame: tangent A runs from the
//! origin along +X and the bend turns toward +Z about the centre
//! `(tangent_a, 0, bend_radius)`.

use crate::math::{Point3, Vector3};
use crate::params::PipeParams;

/// Segments in the bend-angle arc.
pub const BEND_ANGLE_ARC_SEGMENTS: usize = 50;

/// Leader offset from the tube, as a multiple of the outer radius.
pub const LEADER_OFFSET_FACTOR: f64 = 1.5;

/// What a dimension measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    TangentA,
    TangentB,
    BendRadius,
    BendAngle,
    OuterDiameter,
    InnerDiameter,
}

impl DimensionKind {
    /// Caption shown before the value.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            DimensionKind::TangentA => "Tangent A",
            DimensionKind::TangentB => "Tangent B",
            DimensionKind::BendRadius => "CLR",
            DimensionKind::BendAngle => "Bend Angle",
            DimensionKind::OuterDiameter => "OD",
            DimensionKind::InnerDiameter => "ID",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            DimensionKind::BendAngle => "°",
            _ => "\"",
        }
    }
}

/// One labelled dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub kind: DimensionKind,
    /// Text such as `Tangent A: 2.0"`.
    pub label: String,
    /// Nominal parameter value, before any numerical epsilon.
    pub value: f64,
    /// Line the label is attached to.
    pub leader: (Point3, Point3),
    /// Arc polyline; only set for the bend angle.
    pub arc: Vec<Point3>,
}

impl Dimension {
    fn new(kind: DimensionKind, value: f64, leader: (Point3, Point3)) -> Self {
        Self {
            kind,
            label: format!("{}: {value:.1}{}", kind.caption(), kind.unit()),
            value,
            leader,
            arc: Vec::new(),
        }
    }
}

/// The full set of dimensions for one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    dimensions: Vec<Dimension>,
}

impl Measurements {
    /// Lays out every dimension for `params`.
    #[must_use]
    pub fn from_params(params: &PipeParams) -> Self {
        let ta = params.tangent_a;
        let tb = params.tangent_b;
        let r = params.bend_radius;
        let bend = params.bend_angle_deg.to_radians();
        let offset = params.outer_radius * LEADER_OFFSET_FACTOR;

        let centre = Point3::new(ta, 0.0, r);
        // Direction from the bend centre to the arc point at `angle`.
        let spoke = |angle: f64| Vector3::new(angle.sin(), 0.0, -angle.cos());
        let bend_end = centre + spoke(bend) * r;
        let out_dir = Vector3::new(bend.cos(), 0.0, bend.sin());

        let tangent_a = Dimension::new(
            DimensionKind::TangentA,
            ta,
            (Point3::new(0.0, 0.0, -offset), Point3::new(ta, 0.0, -offset)),
        );

        let side = spoke(bend) * offset;
        let tangent_b = Dimension::new(
            DimensionKind::TangentB,
            tb,
            (bend_end + side, bend_end + out_dir * tb + side),
        );

        let bend_radius = Dimension::new(
            DimensionKind::BendRadius,
            r,
            (centre, centre + spoke(bend * 0.5) * r),
        );

        let arc_radius = r + offset;
        #[allow(clippy::cast_precision_loss)]
        let arc: Vec<Point3> = (0..=BEND_ANGLE_ARC_SEGMENTS)
            .map(|i| {
                let t = i as f64 / BEND_ANGLE_ARC_SEGMENTS as f64;
                centre + spoke(t * bend) * arc_radius
            })
            .collect();
        let mut bend_angle = Dimension::new(
            DimensionKind::BendAngle,
            params.bend_angle_deg,
            (centre + spoke(0.0) * arc_radius, centre + spoke(bend) * arc_radius),
        );
        bend_angle.arc = arc;

        let across = |radius: f64| {
            (
                Point3::new(ta * 0.5, 0.0, -radius),
                Point3::new(ta * 0.5, 0.0, radius),
            )
        };
        let outer = Dimension::new(
            DimensionKind::OuterDiameter,
            params.outer_radius,
            across(params.outer_radius),
        );
        let inner = Dimension::new(
            DimensionKind::InnerDiameter,
            params.inner_radius,
            across(params.inner_radius),
        );

        Self {
            dimensions: vec![tangent_a, tangent_b, bend_radius, bend_angle, outer, inner],
        }
    }

    /// Looks up one dimension.
    #[must_use]
    pub fn get(&self, kind: DimensionKind) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.kind == kind)
    }

    /// All dimensions, in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn standard() -> Measurements {
        Measurements::from_params(&PipeParams::default())
    }

    #[test]
    fn labels_use_one_decimal() {
        let m = standard();
        let label = |kind| m.get(kind).unwrap().label.clone();
        assert_eq!(label(DimensionKind::TangentA), "Tangent A: 2.0\"");
        assert_eq!(label(DimensionKind::TangentB), "Tangent B: 2.0\"");
        assert_eq!(label(DimensionKind::BendRadius), "CLR: 3.0\"");
        assert_eq!(label(DimensionKind::BendAngle), "Bend Angle: 88.0°");
        assert_eq!(label(DimensionKind::OuterDiameter), "OD: 1.7\"");
        assert_eq!(label(DimensionKind::InnerDiameter), "ID: 1.4\"");
        assert_eq!(m.iter().count(), 6);
    }

    #[test]
    fn values_are_nominal() {
        let params = PipeParams::default().with_tangents(0.0, 0.0).with_bend_angle(0.0);
        let m = Measurements::from_params(&params);
        assert_abs_diff_eq!(m.get(DimensionKind::TangentA).unwrap().value, 0.0);
        assert_abs_diff_eq!(m.get(DimensionKind::BendAngle).unwrap().value, 0.0);
    }

    #[test]
    fn leaders_stand_off_the_tube() {
        let params = PipeParams::default();
        let m = standard();
        let offset = params.outer_radius * LEADER_OFFSET_FACTOR;

        let (a0, a1) = m.get(DimensionKind::TangentA).unwrap().leader;
        assert_abs_diff_eq!(a0.z, -offset);
        assert_abs_diff_eq!((a1 - a0).norm(), params.tangent_a, epsilon = 1e-12);

        let (b0, b1) = m.get(DimensionKind::TangentB).unwrap().leader;
        assert_abs_diff_eq!((b1 - b0).norm(), params.tangent_b, epsilon = 1e-12);
        // The tangent-B leader sits outside the bend, away from its centre.
        let centre = Point3::new(params.tangent_a, 0.0, params.bend_radius);
        let bend = params.bend_angle_deg.to_radians();
        let bend_end = centre + Vector3::new(bend.sin(), 0.0, -bend.cos()) * params.bend_radius;
        assert!((b0 - centre).norm() > (bend_end - centre).norm());
    }

    #[test]
    fn bend_angle_arc() {
        let params = PipeParams::default();
        let m = standard();
        let arc = &m.get(DimensionKind::BendAngle).unwrap().arc;
        assert_eq!(arc.len(), BEND_ANGLE_ARC_SEGMENTS + 1);

        let centre = Point3::new(params.tangent_a, 0.0, params.bend_radius);
        let radius = params.bend_radius + LEADER_OFFSET_FACTOR * params.outer_radius;
        for p in arc {
            assert_abs_diff_eq!((p - centre).norm(), radius, epsilon = 1e-12);
        }
        let first = arc[0] - centre;
        let last = arc[arc.len() - 1] - centre;
        assert_abs_diff_eq!(
            first.angle(&last),
            params.bend_angle_deg.to_radians(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn bend_radius_leader_reaches_the_arc() {
        let params = PipeParams::default();
        let (c, p) = standard().get(DimensionKind::BendRadius).unwrap().leader;
        assert_abs_diff_eq!((p - c).norm(), params.bend_radius, epsilon = 1e-12);
        // Half way round the bend.
        let half = (params.bend_angle_deg * 0.5).to_radians();
        assert_abs_diff_eq!((p - c).angle(&-Vector3::z()), half, epsilon = 1e-12);
    }
}
