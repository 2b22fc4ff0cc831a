//! Pointer unprojection onto the ground plane.
//!
//! Pointer positions arrive in normalized device coordinates with x running
//! left (-1) to right (+1) and y running bottom (-1) to top (+1), which is the
//! clip-space orientation of the renderer. Screen pixels have y pointing down,
//! so the input layer flips y before calling in here.

use crate::math::{transform_homogeneous, try_invert, GroundPoint};
use glam::{Mat4, Vec2, Vec3, Vec4};
use thiserror::Error;

/// Near-plane depth in clip space for the `[0, 1]` depth range the projection
/// uses. The value only seeds the inverse projection; step three of
/// [`pointer_ray`] overwrites the resulting depth.
const NEAR_CLIP_DEPTH: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnprojectError {
    #[error("projection or view matrix is not invertible")]
    SingularMatrix,
    #[error("pointer ray does not meet the ground plane")]
    DegenerateRay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray with a normalized direction, or `None` for a zero or
    /// non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || !origin.is_finite() {
            return None;
        }
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the plane y = 0.
    ///
    /// Only a ray parallel to the plane is rejected; a negative `t` (ground
    /// behind the origin) still yields the mirrored hit point.
    pub fn intersect_ground(&self) -> Result<GroundPoint, UnprojectError> {
        if self.direction.y == 0.0 {
            return Err(UnprojectError::DegenerateRay);
        }

        let t = -self.origin.y / self.direction.y;
        let hit = self.at(t);
        if !hit.is_finite() {
            return Err(UnprojectError::DegenerateRay);
        }

        Ok(GroundPoint::from_world(hit))
    }
}

/// World-space ray from the camera through the pointer.
pub fn pointer_ray(
    ndc: Vec2,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
) -> Result<Ray, UnprojectError> {
    let inverse_projection = try_invert(projection).ok_or(UnprojectError::SingularMatrix)?;
    let inverse_view = try_invert(view).ok_or(UnprojectError::SingularMatrix)?;

    let clip = Vec4::new(ndc.x, ndc.y, NEAR_CLIP_DEPTH, 1.0);
    let eye = transform_homogeneous(&inverse_projection, clip);

    // The ray starts at the camera, so keep only the view-space heading.
    let eye_direction = Vec4::new(eye.x, eye.y, -1.0, 0.0);
    let world = transform_homogeneous(&inverse_view, eye_direction);

    Ray::new(camera_position, world.truncate()).ok_or(UnprojectError::DegenerateRay)
}

/// Ground-plane point under the pointer. Pure in its four inputs.
pub fn unproject_to_ground(
    ndc: Vec2,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
) -> Result<GroundPoint, UnprojectError> {
    pointer_ray(ndc, projection, view, camera_position)?.intersect_ground()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{OrbitCamera, Projection};
    use std::f32::consts::FRAC_PI_2;

    fn overhead() -> (Mat4, Mat4, Vec3) {
        let camera = OrbitCamera::new(20.0).unwrap().with_angles(0.0, FRAC_PI_2);
        let projection = Projection::default().matrix();
        (projection, camera.view_matrix(), camera.position())
    }

    #[test]
    fn center_of_screen_from_overhead_hits_origin() {
        let (proj, view, eye) = overhead();
        let target = unproject_to_ground(Vec2::ZERO, &proj, &view, eye).unwrap();
        assert!(target.x.abs() < 1e-3);
        assert!(target.z.abs() < 1e-3);
    }

    #[test]
    fn screen_edge_maps_to_half_fov_footprint() {
        let (proj, view, eye) = overhead();
        let right = unproject_to_ground(Vec2::new(1.0, 0.0), &proj, &view, eye).unwrap();
        let expected = 20.0 * (std::f32::consts::FRAC_PI_8).tan();
        assert!((right.x.abs() - expected).abs() < 1e-2);
        assert!(right.z.abs() < 1e-2);
    }

    #[test]
    fn opposite_pointers_mirror_each_other() {
        let (proj, view, eye) = overhead();
        let a = unproject_to_ground(Vec2::new(0.5, 0.25), &proj, &view, eye).unwrap();
        let b = unproject_to_ground(Vec2::new(-0.5, -0.25), &proj, &view, eye).unwrap();
        assert!((a.x + b.x).abs() < 1e-3);
        assert!((a.z + b.z).abs() < 1e-3);
    }

    #[test]
    fn is_deterministic() {
        let camera = OrbitCamera::new(20.0).unwrap().with_angles(0.6, 0.7);
        let proj = Projection::default().matrix();
        let view = camera.view_matrix();
        let ndc = Vec2::new(0.3, -0.4);
        let first = unproject_to_ground(ndc, &proj, &view, camera.position());
        let second = unproject_to_ground(ndc, &proj, &view, camera.position());
        assert_eq!(first, second);
    }

    #[test]
    fn parallel_ray_is_degenerate() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X).unwrap();
        assert_eq!(ray.intersect_ground(), Err(UnprojectError::DegenerateRay));
    }

    #[test]
    fn ray_below_the_plane_still_intersects() {
        let ray = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(1.0, -1.0, 0.0)).unwrap();
        let hit = ray.intersect_ground().unwrap();
        assert!((hit.x + 2.0).abs() < 1e-5);
    }

    #[test]
    fn singular_projection_is_reported() {
        let (_, view, eye) = overhead();
        let result = unproject_to_ground(Vec2::ZERO, &Mat4::ZERO, &view, eye);
        assert_eq!(result, Err(UnprojectError::SingularMatrix));
    }

    #[test]
    fn singular_view_is_reported() {
        let (proj, _, eye) = overhead();
        let result = unproject_to_ground(Vec2::ZERO, &proj, &Mat4::ZERO, eye);
        assert_eq!(result, Err(UnprojectError::SingularMatrix));
    }

    #[test]
    fn zero_direction_is_not_a_ray() {
        assert!(Ray::new(Vec3::ONE, Vec3::ZERO).is_none());
    }
}
