//! wgpu implementations of `MeshRenderer`: window surface and offscreen texture

use std::sync::Arc;
use winit::window::Window;

use crate::backend::{check_mesh, MeshRenderer};
use crate::context::{RenderContext, RenderError};
use crate::gpu_mesh::GpuTerrainMesh;
use crate::headless::HeadlessContext;
use crate::pipeline::{FrameUniforms, TerrainPipeline};
use relief_terrain::TerrainMesh;

fn upload(device: &wgpu::Device, mesh: &TerrainMesh) -> Result<GpuTerrainMesh, RenderError> {
    check_mesh(mesh)?;
    let gpu = GpuTerrainMesh::upload(device, mesh);
    tracing::info!(
        vertices = gpu.vertex_count,
        indices = gpu.index_count,
        "uploaded terrain mesh"
    );
    Ok(gpu)
}

/// Draws into a window's swapchain and presents each frame
pub struct SurfaceRenderer {
    pub context: RenderContext,
    pipeline: TerrainPipeline,
}

impl SurfaceRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let context = RenderContext::new(window).await?;
        let pipeline = TerrainPipeline::new(&context.device, context.config.format);
        Ok(Self { context, pipeline })
    }

    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.context.resize(size);
    }
}

impl MeshRenderer for SurfaceRenderer {
    type Mesh = GpuTerrainMesh;

    fn upload_mesh(&mut self, mesh: &TerrainMesh) -> Result<Self::Mesh, RenderError> {
        upload(&self.context.device, mesh)
    }

    fn draw_mesh(
        &mut self,
        mesh: &Self::Mesh,
        uniforms: &FrameUniforms,
    ) -> Result<(), RenderError> {
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one draws into the rebuilt swapchain
                tracing::warn!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::SurfaceError(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.pipeline.draw(
            &self.context.device,
            &self.context.queue,
            &view,
            &self.context.depth_view,
            mesh,
            uniforms,
        );

        output.present();
        Ok(())
    }

    fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }
}

/// Draws into an offscreen texture that can be read back as RGBA bytes
pub struct HeadlessRenderer {
    pub context: HeadlessContext,
    pipeline: TerrainPipeline,
}

impl HeadlessRenderer {
    pub async fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let context = HeadlessContext::new(width, height).await?;
        let pipeline = TerrainPipeline::new(&context.device, context.format);
        Ok(Self { context, pipeline })
    }

    /// Pixels of the last drawn frame, tightly packed RGBA rows
    pub async fn read_pixels(&self) -> Result<Vec<u8>, RenderError> {
        self.context.read_pixels().await
    }
}

impl MeshRenderer for HeadlessRenderer {
    type Mesh = GpuTerrainMesh;

    fn upload_mesh(&mut self, mesh: &TerrainMesh) -> Result<Self::Mesh, RenderError> {
        upload(&self.context.device, mesh)
    }

    fn draw_mesh(
        &mut self,
        mesh: &Self::Mesh,
        uniforms: &FrameUniforms,
    ) -> Result<(), RenderError> {
        self.pipeline.draw(
            &self.context.device,
            &self.context.queue,
            &self.context.color_view,
            &self.context.depth_view,
            mesh,
            uniforms,
        );
        Ok(())
    }

    fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }
}
