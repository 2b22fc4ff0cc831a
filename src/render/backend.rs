//! The narrow contract between the scene and whatever draws it.

use super::mesh::MeshData;
use glam::Mat4;
use std::sync::Arc;
use winit::window::Window;

/// Opaque reference to geometry uploaded through
/// [`RenderBackend::create_geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u32);

impl GeometryHandle {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub trait RenderBackend {
    /// Uploads static geometry. Called once per mesh at startup.
    fn create_geometry(&mut self, mesh: &MeshData) -> GeometryHandle;

    /// Session-wide projection, updated again only when the viewport resizes.
    fn set_projection(&mut self, projection: Mat4);

    /// Starts a frame. Called once per tick before any draw.
    fn clear_frame(&mut self);

    /// Draws `geometry` in `color` with the given model-view `transform`.
    fn draw(&mut self, geometry: GeometryHandle, color: [f32; 4], transform: Mat4);
}

/// Host animation-frame primitive.
pub trait FrameScheduler {
    fn schedule_next_frame(&mut self);
}

impl FrameScheduler for Arc<Window> {
    fn schedule_next_frame(&mut self) {
        self.request_redraw();
    }
}
