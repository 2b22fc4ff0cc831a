use glam::{Mat4, Vec3};

/// Placement of a mesh in world space: a translation and a per-axis scale.
///
/// Meshes in the scene are axis aligned, so there is no rotation component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * Mat4::from_scale(self.scale)
    }

    /// Model-view matrix: this placement seen through `view`.
    pub fn relative_to(&self, view: &Mat4) -> Mat4 {
        *view * self.to_matrix()
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        point * self.scale + self.translation
    }
}
