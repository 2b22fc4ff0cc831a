// Headless stand-ins for the GPU backend and the host frame loop.

#![allow(dead_code)]

use glam::Mat4;
use snake_follow::render::{FrameScheduler, GeometryHandle, MeshData, RenderBackend};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateGeometry { vertices: usize, indices: usize },
    SetProjection(Mat4),
    ClearFrame,
    Draw {
        geometry: GeometryHandle,
        color: [f32; 4],
        transform: Mat4,
    },
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since the most recent `clear_frame`, inclusive.
    pub fn last_frame(&self) -> &[Call] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == Call::ClearFrame)
            .unwrap_or(self.calls.len());
        &self.calls[start..]
    }

    pub fn draws(&self) -> Vec<(GeometryHandle, [f32; 4], Mat4)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                Call::Draw {
                    geometry,
                    color,
                    transform,
                } => Some((*geometry, *color, *transform)),
                _ => None,
            })
            .collect()
    }

    pub fn projections(&self) -> Vec<Mat4> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetProjection(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl RenderBackend for RecordingBackend {
    fn create_geometry(&mut self, mesh: &MeshData) -> GeometryHandle {
        self.calls.push(Call::CreateGeometry {
            vertices: mesh.vertices.len(),
            indices: mesh.indices.len(),
        });
        let handle = GeometryHandle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.calls.push(Call::SetProjection(projection));
    }

    fn clear_frame(&mut self) {
        self.calls.push(Call::ClearFrame);
    }

    fn draw(&mut self, geometry: GeometryHandle, color: [f32; 4], transform: Mat4) {
        self.calls.push(Call::Draw {
            geometry,
            color,
            transform,
        });
    }
}

#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub requests: usize,
}

impl FrameScheduler for CountingScheduler {
    fn schedule_next_frame(&mut self) {
        self.requests += 1;
    }
}
