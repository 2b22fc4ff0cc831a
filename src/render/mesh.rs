use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// CPU-side geometry handed to a backend once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned cube centred on the origin, four vertices per face so every
    /// face carries its own normal.
    pub fn cube(half_extent: f32) -> Self {
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, right, up) in faces {
            let base = vertices.len() as u32;
            let center = normal * half_extent;
            let right = right * half_extent;
            let up = up * half_extent;

            vertices.push(Vertex::new(center - right - up, normal));
            vertices.push(Vertex::new(center + right - up, normal));
            vertices.push(Vertex::new(center + right + up, normal));
            vertices.push(Vertex::new(center - right + up, normal));

            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Square at height `y` spanning `±half_extent` on x and z, facing up.
    pub fn ground(half_extent: f32, y: f32) -> Self {
        let h = half_extent;
        let vertices = vec![
            Vertex::new(Vec3::new(-h, y, -h), Vec3::Y),
            Vertex::new(Vec3::new(h, y, -h), Vec3::Y),
            Vertex::new(Vec3::new(h, y, h), Vec3::Y),
            Vertex::new(Vec3::new(-h, y, h), Vec3::Y),
        ];
        // Counter-clockwise seen from above.
        let indices = vec![0, 2, 1, 0, 3, 2];

        Self { vertices, indices }
    }
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub fn from_data(device: &wgpu::Device, data: &MeshData) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(data: &MeshData, tri: &[u32]) -> Vec3 {
        let p = |i: u32| Vec3::from_array(data.vertices[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    #[test]
    fn cube_has_one_quad_per_face() {
        let cube = MeshData::cube(0.5);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube
            .vertices
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() == 0.5)));
    }

    #[test]
    fn cube_winding_matches_normals() {
        let cube = MeshData::cube(0.5);
        for tri in cube.indices.chunks(3) {
            let normal = Vec3::from_array(cube.vertices[tri[0] as usize].normal);
            let winding = triangle_normal(&cube, tri);
            assert!(winding.dot(normal) > 0.0);
            let center = Vec3::from_array(cube.vertices[tri[0] as usize].position);
            assert!(center.dot(normal) > 0.0, "normal must point outward");
        }
    }

    #[test]
    fn ground_faces_up() {
        let ground = MeshData::ground(50.0, -0.6);
        assert_eq!(ground.vertices.len(), 4);
        assert!(ground.vertices.iter().all(|v| v.position[1] == -0.6));
        for tri in ground.indices.chunks(3) {
            assert!(triangle_normal(&ground, tri).y > 0.0);
        }
    }
}
