//! Parameters describing a bent tube.

use crate::error::{check_range, OperationError, Result};

/// Longest straight run the interactive controls allow, in inches.
pub const MAX_TANGENT: f64 = 15.0;

/// Parameters of a straight-bend-straight tube.
///
/// Lengths are in inches, the bend angle in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeParams {
    /// Straight run before the bend. Default: 2.0
    pub tangent_a: f64,

    /// Straight run after the bend. Default: 2.0
    pub tangent_b: f64,

    /// Centerline radius of the bend. Default: 3.0
    pub bend_radius: f64,

    /// Bend angle in degrees, in `[0, 180]`. Default: 88.0
    pub bend_angle_deg: f64,

    /// Outer wall radius. Default: 1.66
    pub outer_radius: f64,

    /// Inner wall radius; must be below `outer_radius`. Default: 1.38
    pub inner_radius: f64,

    /// Number of arc samples along the bend. Default: 35
    pub arc_resolution: u32,

    /// Number of points around each wall circle. Default: 70
    pub profile_segments: usize,
}

impl Default for PipeParams {
    fn default() -> Self {
        Self {
            tangent_a: 2.0,
            tangent_b: 2.0,
            bend_radius: 3.0,
            bend_angle_deg: 88.0,
            outer_radius: 1.66,
            inner_radius: 1.38,
            arc_resolution: 35,
            profile_segments: 70,
        }
    }
}

impl PipeParams {
    /// Set both straight runs.
    #[must_use]
    pub const fn with_tangents(mut self, tangent_a: f64, tangent_b: f64) -> Self {
        self.tangent_a = tangent_a;
        self.tangent_b = tangent_b;
        self
    }

    /// Set the bend radius.
    #[must_use]
    pub const fn with_bend_radius(mut self, bend_radius: f64) -> Self {
        self.bend_radius = bend_radius;
        self
    }

    /// Set the bend angle in degrees.
    #[must_use]
    pub const fn with_bend_angle(mut self, degrees: f64) -> Self {
        self.bend_angle_deg = degrees;
        self
    }

    /// Set the outer and inner wall radii.
    #[must_use]
    pub const fn with_radii(mut self, outer_radius: f64, inner_radius: f64) -> Self {
        self.outer_radius = outer_radius;
        self.inner_radius = inner_radius;
        self
    }

    /// Set the arc and profile sampling.
    #[must_use]
    pub const fn with_resolution(mut self, arc_resolution: u32, profile_segments: usize) -> Self {
        self.arc_resolution = arc_resolution;
        self.profile_segments = profile_segments;
        self
    }

    /// Clamps the bend angle to `[0, 180]` and both tangents to
    /// `[0, MAX_TANGENT]`, as the interactive controls do.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.bend_angle_deg = self.bend_angle_deg.clamp(0.0, 180.0);
        self.tangent_a = self.tangent_a.clamp(0.0, MAX_TANGENT);
        self.tangent_b = self.tangent_b.clamp(0.0, MAX_TANGENT);
        self
    }

    /// Checks every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::ParameterOutOfRange`](crate::error::GeometryError::ParameterOutOfRange)
    ///   for a negative or non-finite tangent, a non-positive bend radius or
    ///   wall radius, an angle outside `[0, 180]`, or an inner radius not
    ///   below the outer radius.
    /// - [`OperationError::InvalidInput`] for a zero arc resolution or fewer
    ///   than 3 profile segments.
    pub fn validate(&self) -> Result<()> {
        check_range("tangent_a", self.tangent_a, 0.0, f64::MAX)?;
        check_range("tangent_b", self.tangent_b, 0.0, f64::MAX)?;
        check_range("bend_radius", self.bend_radius, f64::MIN_POSITIVE, f64::MAX)?;
        check_range("bend_angle_deg", self.bend_angle_deg, 0.0, 180.0)?;
        check_range("outer_radius", self.outer_radius, f64::MIN_POSITIVE, f64::MAX)?;
        check_range("inner_radius", self.inner_radius, f64::MIN_POSITIVE, self.outer_radius)?;
        if self.inner_radius >= self.outer_radius {
            return Err(OperationError::InvalidInput(format!(
                "inner radius {} must be below outer radius {}",
                self.inner_radius, self.outer_radius
            ))
            .into());
        }
        if self.arc_resolution == 0 {
            return Err(OperationError::InvalidInput("arc resolution must be at least 1".into()).into());
        }
        if self.profile_segments < 3 {
            return Err(OperationError::InvalidInput(format!(
                "profile needs at least 3 segments, got {}",
                self.profile_segments
            ))
            .into());
        }
        Ok(())
    }
}
