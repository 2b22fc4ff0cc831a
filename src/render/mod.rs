//! WebGPU Rendering module
//!
//! The backend contract the scene draws through, CPU mesh data, and the wgpu
//! implementation of that contract.

pub mod backend;
pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod renderer;

pub use backend::{FrameScheduler, GeometryHandle, RenderBackend};
pub use context::GpuContext;
pub use mesh::{Mesh, MeshData, Vertex};
pub use pipeline::{Light, LightingModel, RenderPipelines, Uniforms};
pub use renderer::SceneRenderer;
