//! GPU-resident terrain mesh: one vertex buffer per attribute stream

use relief_terrain::TerrainMesh;
use wgpu::util::DeviceExt;

/// Buffers for one uploaded `TerrainMesh`
pub struct GpuTerrainMesh {
    pub position_buffer: wgpu::Buffer,
    pub color_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub vertex_count: u32,
}

impl GpuTerrainMesh {
    /// Upload positions, colors, normals and the 16-bit index list
    pub fn upload(device: &wgpu::Device, mesh: &TerrainMesh) -> Self {
        let stream = |label: &str, data: &[[f32; 3]]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };

        let position_buffer = stream("Terrain Position Buffer", &mesh.positions);
        let color_buffer = stream("Terrain Color Buffer", &mesh.colors);
        let normal_buffer = stream("Terrain Normal Buffer", &mesh.normals);

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            position_buffer,
            color_buffer,
            normal_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            vertex_count: mesh.positions.len() as u32,
        }
    }
}
