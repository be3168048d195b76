//! Math utilities and types
//!
//! Provides the vector and matrix types used by scene records and the output
//! model, plus the host-to-renderer axis conversion.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix3, Matrix4,
};

/// 2D vector type (UV coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Convert a host-space vector (Z up) into the renderer's axis order.
///
/// The host stores `(x, y, z)` with Z pointing up; the renderer expects
/// `(x, z, y)`. Only the second and third components are swapped, no sign
/// change or scaling is applied.
#[inline]
pub fn to_renderer_axes(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}

/// Transform a position by a homogeneous matrix.
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*point)).coords
}

/// Normal matrix for a homogeneous transform (inverse transpose of the upper 3x3).
///
/// Falls back to the plain upper 3x3 when it is singular, so degenerate
/// transforms still produce a usable direction.
pub fn normal_matrix(matrix: &Mat4) -> Mat3 {
    let upper: Mat3 = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    upper
        .try_inverse()
        .map_or(upper, |inverse| inverse.transpose())
}

/// Transform a normal by a normal matrix and renormalize it.
///
/// Zero-length results are returned unchanged rather than producing NaNs.
pub fn transform_normal(normal_matrix: &Mat3, normal: &Vec3) -> Vec3 {
    let transformed = normal_matrix * normal;
    transformed
        .try_normalize(f32::EPSILON)
        .unwrap_or(transformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_swap() {
        let host = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(to_renderer_axes(&host), Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_axis_swap_is_involution() {
        let host = Vec3::new(-0.5, 0.25, 7.0);
        assert_eq!(to_renderer_axes(&to_renderer_axes(&host)), host);
    }

    #[test]
    fn test_transform_point_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let moved = transform_point(&matrix, &Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(moved, Vec3::new(2.0, 3.0, 4.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_ignores_translation_and_renormalizes() {
        let matrix = Mat4::new_translation(&Vec3::new(5.0, 0.0, 0.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 1.0));
        let nm = normal_matrix(&matrix);
        let normal = transform_normal(&nm, &Vec3::new(1.0, 1.0, 0.0).normalize());
        assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-6);
        // Stretching along X pushes the normal towards Y.
        assert!(normal.y > normal.x);
    }

    #[test]
    fn test_singular_matrix_falls_back() {
        let matrix = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 1.0, 0.0));
        let nm = normal_matrix(&matrix);
        let normal = transform_normal(&nm, &Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(normal, Vec3::zeros());
    }
}
