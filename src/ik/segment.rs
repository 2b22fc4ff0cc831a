use glam::{Vec2, Vec3};

/// One cube of the chain. Only x and z change after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub position: Vec3,
}

impl Segment {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Horizontal coordinates as `(x, z)`.
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub fn translate_planar(&mut self, offset: Vec2) {
        self.position.x += offset.x;
        self.position.z += offset.y;
    }
}
