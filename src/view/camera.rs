use crate::config::ConfigError;
use crate::math::look_at;
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

pub const MIN_PITCH: f32 = -FRAC_PI_2;
pub const MAX_PITCH: f32 = FRAC_PI_2;

/// A discrete rotation request from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Camera orbiting the world origin on a sphere of fixed radius.
///
/// The eye position is always derived from `(yaw, pitch, radius)`; nothing else
/// is stored. Yaw is unbounded and wraps through the trigonometry, pitch is
/// held inside `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    radius: f32,
    axis_clamp: Option<f32>,
}

impl OrbitCamera {
    pub fn new(radius: f32) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }

        Ok(Self {
            yaw: 0.0,
            pitch: 0.0,
            radius,
            axis_clamp: None,
        })
    }

    pub fn with_angles(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        self
    }

    /// Bounds each coordinate of [`position`](Self::position) to `±max`.
    pub fn with_axis_clamp(mut self, max: Option<f32>) -> Result<Self, ConfigError> {
        if let Some(m) = max {
            if !(m.is_finite() && m > 0.0) {
                return Err(ConfigError::InvalidAxisClamp(m));
            }
        }
        self.axis_clamp = max;
        Ok(self)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn axis_clamp(&self) -> Option<f32> {
        self.axis_clamp
    }

    /// Up/Down lower/raise the pitch, Left/Right lower/raise the yaw.
    pub fn apply_rotation(&mut self, direction: Direction, step: f32) {
        match direction {
            Direction::Up => self.pitch = (self.pitch - step).clamp(MIN_PITCH, MAX_PITCH),
            Direction::Down => self.pitch = (self.pitch + step).clamp(MIN_PITCH, MAX_PITCH),
            Direction::Left => self.yaw -= step,
            Direction::Right => self.yaw += step,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let position = self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);

        match self.axis_clamp {
            Some(max) => position.clamp(Vec3::splat(-max), Vec3::splat(max)),
            None => position,
        }
    }

    /// Look-at from [`position`](Self::position) toward the origin with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position(), Vec3::ZERO, Vec3::Y)
    }
}
