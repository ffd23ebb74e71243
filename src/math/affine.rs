use super::{Matrix4, Point3, Vector3};

/// Builds the profile-local shear `y' = y - shift * x`.
///
/// Applied to a profile embedded in the local XZ plane, this tilts the ring
/// onto a miter plane when `shift = tan(turn / 2)`.
#[must_use]
pub fn shear_matrix(shift: f64) -> Matrix4 {
    #[rustfmt::skip]
    let m = Matrix4::new(
        1.0,    0.0, 0.0, 0.0,
        -shift, 1.0, 0.0, 0.0,
        0.0,    0.0, 1.0, 0.0,
        0.0,    0.0, 0.0, 1.0,
    );
    m
}

/// Builds a rotation whose columns are the images of the local X, Y and Z axes.
///
/// The caller guarantees the three axes form a right-handed orthonormal basis.
#[must_use]
pub fn basis_matrix(x_axis: &Vector3, y_axis: &Vector3, z_axis: &Vector3) -> Matrix4 {
    #[rustfmt::skip]
    let m = Matrix4::new(
        x_axis.x, y_axis.x, z_axis.x, 0.0,
        x_axis.y, y_axis.y, z_axis.y, 0.0,
        x_axis.z, y_axis.z, z_axis.z, 0.0,
        0.0,      0.0,      0.0,      1.0,
    );
    m
}

/// Composes the ring transform: shear, then rotation onto the path frame,
/// then translation to `origin`.
///
/// Local X maps to `normal × tangent`, local Y to `-tangent`, local Z to
/// `normal`. Both `tangent` and `normal` must be unit length and orthogonal.
#[must_use]
pub fn ring_matrix(origin: &Point3, tangent: &Vector3, normal: &Vector3, shift: f64) -> Matrix4 {
    let side = normal.cross(tangent);
    let rotation = basis_matrix(&side, &(-tangent), normal);
    Matrix4::new_translation(&origin.coords) * rotation * shear_matrix(shift)
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

/// Transforms a direction vector by a 4x4 matrix (ignoring translation).
#[must_use]
pub fn transform_direction(matrix: &Matrix4, dir: &Vector3) -> Vector3 {
    let v = matrix * nalgebra::Vector4::new(dir.x, dir.y, dir.z, 0.0);
    Vector3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn shear_moves_points_along_local_y() {
        let m = shear_matrix(0.5);
        let q = transform_point(&m, &Point3::new(2.0, 0.0, 1.0));
        assert_abs_diff_eq!(q.x, 2.0);
        assert_abs_diff_eq!(q.y, -1.0);
        assert_abs_diff_eq!(q.z, 1.0);
    }

    #[test]
    fn ring_matrix_maps_axes() {
        let origin = Point3::new(1.0, 2.0, 3.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let normal = Vector3::new(0.0, 1.0, 0.0);
        let m = ring_matrix(&origin, &tangent, &normal, 0.0);

        let x = transform_direction(&m, &Vector3::x());
        let z = transform_direction(&m, &Vector3::z());
        // normal × tangent = Y × X = -Z
        assert_abs_diff_eq!(x, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(z, normal, epsilon = 1e-15);

        let p = transform_point(&m, &Point3::origin());
        assert_abs_diff_eq!(p, origin, epsilon = 1e-15);
    }

    #[test]
    fn ring_matrix_rotation_is_proper() {
        let tangent = Vector3::new(0.6, 0.0, 0.8);
        let normal = Vector3::new(0.0, 1.0, 0.0);
        let m = ring_matrix(&Point3::origin(), &tangent, &normal, 0.0);
        let det = m.fixed_view::<3, 3>(0, 0).determinant();
        assert_abs_diff_eq!(det, 1.0, epsilon = 1e-12);
    }
}
