//! Scene configuration.
//!
//! Every tunable of the scene lives in [`SceneConfig`]. The defaults reproduce
//! the unlit demo; [`SceneConfig::lit`] reproduces the phong-shaded variant
//! with the camera axis clamp and the deeper far plane.

use crate::render::LightingModel;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("camera radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("camera axis clamp must be positive and finite, got {0}")]
    InvalidAxisClamp(f32),
    #[error("invalid projection: {0}")]
    InvalidProjection(&'static str),
    #[error("invalid chain: {0}")]
    InvalidChain(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Orbit distance from the world origin.
    pub camera_radius: f32,
    pub camera_yaw: f32,
    /// Clamped to `[-π/2, π/2]`.
    pub camera_pitch: f32,
    /// Radians applied per directional key press.
    pub rotation_step: f32,
    /// Per-axis bound on the camera position, `None` to leave it unclamped.
    pub axis_clamp: Option<f32>,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub segment_count: usize,
    /// Maximum distance kept between neighbouring segments.
    pub segment_spacing: f32,
    /// World units the head travels per frame.
    pub head_speed: f32,
    pub segment_height: f32,
    pub ground_height: f32,
    pub ground_half_extent: f32,
    pub lighting: LightingModel,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_radius: 20.0,
            camera_yaw: 0.0,
            camera_pitch: 0.0,
            rotation_step: 0.1,
            axis_clamp: None,
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            segment_count: 10,
            segment_spacing: 1.0,
            head_speed: 0.1,
            segment_height: 3.0,
            ground_height: -0.6,
            ground_half_extent: 50.0,
            lighting: LightingModel::Flat,
        }
    }
}

impl SceneConfig {
    pub const DEFAULT_AXIS_CLAMP: f32 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Phong lighting, camera clamped to ±100 per axis, far plane at 1000.
    pub fn lit() -> Self {
        Self {
            axis_clamp: Some(Self::DEFAULT_AXIS_CLAMP),
            far: 1000.0,
            lighting: LightingModel::Phong,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.camera_radius.is_finite() && self.camera_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.camera_radius));
        }
        if let Some(max) = self.axis_clamp {
            if !(max.is_finite() && max > 0.0) {
                return Err(ConfigError::InvalidAxisClamp(max));
            }
        }
        if !self.rotation_step.is_finite() {
            return Err(ConfigError::InvalidProjection("rotation step must be finite"));
        }
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(ConfigError::InvalidProjection("field of view must lie in (0, π)"));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::InvalidProjection("require 0 < near < far"));
        }
        if self.segment_count == 0 {
            return Err(ConfigError::InvalidChain("at least one segment is required"));
        }
        if !(self.segment_spacing.is_finite() && self.segment_spacing > 0.0) {
            return Err(ConfigError::InvalidChain("segment spacing must be positive"));
        }
        if !(self.head_speed.is_finite() && self.head_speed >= 0.0) {
            return Err(ConfigError::InvalidChain("head speed must be non-negative"));
        }
        if !self.segment_height.is_finite() {
            return Err(ConfigError::InvalidChain("segment height must be finite"));
        }
        Ok(())
    }

    /// Initial pitch after clamping to the legal range.
    pub fn clamped_pitch(&self) -> f32 {
        self.camera_pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
    }
}
