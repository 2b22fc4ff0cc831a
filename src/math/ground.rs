use glam::{Vec2, Vec3};

/// A point on the horizontal ground plane (y = 0), stored as its x/z pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundPoint {
    pub x: f32,
    pub z: f32,
}

impl GroundPoint {
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn from_world(point: Vec3) -> Self {
        Self {
            x: point.x,
            z: point.z,
        }
    }

    /// Planar coordinates as `(x, z)`.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    pub fn at_height(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    pub fn distance(self, other: Self) -> f32 {
        (self.to_vec2() - other.to_vec2()).length()
    }
}

impl From<Vec2> for GroundPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, z: v.y }
    }
}
