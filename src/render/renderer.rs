use super::backend::{GeometryHandle, RenderBackend};
use super::context::GpuContext;
use super::mesh::{Mesh, MeshData};
use super::pipeline::{Light, LightingModel, RenderPipelines, Uniforms};
use glam::Mat4;
use winit::dpi::PhysicalSize;

const INITIAL_INSTANCES: usize = 64;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

struct DrawCall {
    geometry: GeometryHandle,
    uniforms: Uniforms,
}

/// wgpu implementation of [`RenderBackend`].
///
/// Draws are recorded between [`clear_frame`](RenderBackend::clear_frame) and
/// [`present`](Self::present), each with its own slot in a dynamically offset
/// uniform buffer, and submitted in a single render pass.
pub struct SceneRenderer {
    context: GpuContext,
    pipelines: RenderPipelines,
    meshes: Vec<Mesh>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniform_alignment: u32,
    capacity: usize,
    projection: Mat4,
    light: Light,
    draw_calls: Vec<DrawCall>,
}

impl SceneRenderer {
    pub fn new(context: GpuContext, lighting: LightingModel) -> Self {
        let pipelines = RenderPipelines::new(&context, lighting);
        let uniform_alignment = context.device.limits().min_uniform_buffer_offset_alignment;
        let (uniform_buffer, bind_group) = Self::create_uniforms(
            &context.device,
            &pipelines,
            uniform_alignment,
            INITIAL_INSTANCES,
        );

        log::info!("Scene renderer ready ({lighting:?} lighting)");

        Self {
            context,
            pipelines,
            meshes: Vec::new(),
            uniform_buffer,
            bind_group,
            uniform_alignment,
            capacity: INITIAL_INSTANCES,
            projection: Mat4::IDENTITY,
            light: Light::default(),
            draw_calls: Vec::new(),
        }
    }

    fn align_to(size: u32, alignment: u32) -> u32 {
        (size + alignment - 1) & !(alignment - 1)
    }

    fn aligned_uniform_size(alignment: u32) -> usize {
        Self::align_to(std::mem::size_of::<Uniforms>() as u32, alignment) as usize
    }

    fn create_uniforms(
        device: &wgpu::Device,
        pipelines: &RenderPipelines,
        alignment: u32,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dynamic Uniform Buffer"),
            size: (Self::aligned_uniform_size(alignment) * capacity) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = pipelines.create_dynamic_bind_group(device, &buffer);
        (buffer, bind_group)
    }

    fn ensure_capacity(&mut self, needed: usize) {
        if needed <= self.capacity {
            return;
        }

        let capacity = needed.next_power_of_two();
        log::debug!("Growing uniform buffer from {} to {} slots", self.capacity, capacity);
        let (buffer, bind_group) = Self::create_uniforms(
            &self.context.device,
            &self.pipelines,
            self.uniform_alignment,
            capacity,
        );
        self.uniform_buffer = buffer;
        self.bind_group = bind_group;
        self.capacity = capacity;
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.context.resize(size);
    }

    pub fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    /// Submits the draws recorded since the last `clear_frame` and presents.
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.context.reconfigure();
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.ensure_capacity(self.draw_calls.len());
        let aligned_size = Self::aligned_uniform_size(self.uniform_alignment);

        let mut uniform_data = vec![0u8; aligned_size * self.draw_calls.len()];
        for (slot, call) in self.draw_calls.iter().enumerate() {
            let offset = slot * aligned_size;
            let bytes = bytemuck::bytes_of(&call.uniforms);
            uniform_data[offset..offset + bytes.len()].copy_from_slice(bytes);
        }
        if !uniform_data.is_empty() {
            self.context
                .queue
                .write_buffer(&self.uniform_buffer, 0, &uniform_data);
        }

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipelines.pipeline);

            for (slot, call) in self.draw_calls.iter().enumerate() {
                let Some(mesh) = self.meshes.get(call.geometry.index()) else {
                    log::warn!("Skipping draw of unknown geometry {:?}", call.geometry);
                    continue;
                };

                let offset = (slot * aligned_size) as u32;
                render_pass.set_bind_group(0, &self.bind_group, &[offset]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl RenderBackend for SceneRenderer {
    fn create_geometry(&mut self, mesh: &MeshData) -> GeometryHandle {
        let handle = GeometryHandle::new(self.meshes.len() as u32);
        self.meshes.push(Mesh::from_data(&self.context.device, mesh));
        handle
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn clear_frame(&mut self) {
        self.draw_calls.clear();
    }

    fn draw(&mut self, geometry: GeometryHandle, color: [f32; 4], transform: Mat4) {
        let uniforms = Uniforms::new(&self.projection, &transform, color, &self.light);
        self.draw_calls.push(DrawCall { geometry, uniforms });
    }
}
