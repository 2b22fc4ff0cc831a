//! Pure 4x4 matrix helpers.
//!
//! Vector arithmetic, multiplication, transpose and identity come straight from
//! glam. The helpers here pin down the conventions the rest of the crate relies
//! on: right-handed view space looking down -Z, and a `[0, 1]` clip depth range
//! as used by wgpu.

use glam::{Mat4, Vec3, Vec4};

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-10;

pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y, aspect, near, far)
}

pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Inverts `m`, or returns `None` when it is singular or not finite.
pub fn try_invert(m: &Mat4) -> Option<Mat4> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        return None;
    }

    let inverse = m.inverse();
    inverse.is_finite().then_some(inverse)
}

/// Multiplies a homogeneous vector by `m` without a perspective divide.
///
/// `w = 1` transforms a point, `w = 0` a direction.
pub fn transform_homogeneous(m: &Mat4, v: Vec4) -> Vec4 {
    *m * v
}

/// Inverse-transpose of a model-view matrix, for transforming normals.
///
/// A singular input yields the identity so a degenerate transform still draws.
pub fn normal_matrix(model_view: &Mat4) -> Mat4 {
    try_invert(model_view)
        .map(|inverse| inverse.transpose())
        .unwrap_or(Mat4::IDENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn zero_matrix_is_singular() {
        assert!(try_invert(&Mat4::ZERO).is_none());
    }

    #[test]
    fn non_finite_matrix_is_rejected() {
        let mut m = Mat4::IDENTITY;
        m.x_axis.x = f32::NAN;
        assert!(try_invert(&m).is_none());
    }

    #[test]
    fn inverse_undoes_projection() {
        let proj = perspective(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
        let inv = try_invert(&proj).expect("projection should be invertible");
        let product = proj * inv;
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn directions_ignore_translation() {
        let m = Mat4::from_translation(Vec3::new(5.0, -2.0, 3.0));
        let dir = transform_homogeneous(&m, Vec4::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(dir, Vec4::new(0.0, 1.0, 0.0, 0.0));

        let point = transform_homogeneous(&m, Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(point, Vec4::new(5.0, -1.0, 3.0, 1.0));
    }

    #[test]
    fn normal_matrix_of_rigid_view_keeps_rotation() {
        let view = look_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, Vec3::Y);
        let normals = normal_matrix(&view);
        let n = normals.transform_vector3(Vec3::Y);
        let expected = view.transform_vector3(Vec3::Y);
        assert!(n.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn normal_matrix_falls_back_to_identity() {
        assert_eq!(normal_matrix(&Mat4::ZERO), Mat4::IDENTITY);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 20.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        assert!(view.transform_point3(eye).abs_diff_eq(Vec3::ZERO, 1e-5));
        assert!(view
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(0.0, 0.0, -20.0), 1e-5));
    }
}
