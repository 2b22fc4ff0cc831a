use crate::config::ConfigError;
use crate::math::perspective;
use glam::Mat4;

/// Perspective lens. Fixed for the session except for the aspect ratio, which
/// follows the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Self, ConfigError> {
        if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
            return Err(ConfigError::InvalidProjection("field of view must lie in (0, π)"));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(ConfigError::InvalidProjection("aspect ratio must be positive"));
        }
        if !(near > 0.0 && far > near && far.is_finite()) {
            return Err(ConfigError::InvalidProjection("require 0 < near < far"));
        }

        Ok(Self {
            fov_y,
            aspect,
            near,
            far,
        })
    }

    pub fn matrix(&self) -> Mat4 {
        perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Updates the aspect ratio from a viewport size. Returns `false` and keeps
    /// the previous ratio when either dimension is zero (minimised window).
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }
}
