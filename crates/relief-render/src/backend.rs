//! The two things a graphics backend must do for the terrain viewer

use crate::context::RenderError;
use crate::pipeline::FrameUniforms;
use relief_terrain::TerrainMesh;

/// Minimal capability interface between the frame loop and a graphics binding.
///
/// A mesh is uploaded once and drawn every frame; nothing else about the
/// backend leaks into the mesher or the frame-state computation.
pub trait MeshRenderer {
    /// Backend-side handle to an uploaded mesh
    type Mesh;

    /// Copy a generated mesh into backend-owned buffers.
    fn upload_mesh(&mut self, mesh: &TerrainMesh) -> Result<Self::Mesh, RenderError>;

    /// Clear the target and draw `mesh` with this frame's uniforms.
    fn draw_mesh(&mut self, mesh: &Self::Mesh, uniforms: &FrameUniforms)
        -> Result<(), RenderError>;

    /// Width / height of the current render target
    fn aspect_ratio(&self) -> f32;
}

/// Reject meshes whose arrays disagree before any backend sees them
pub(crate) fn check_mesh(mesh: &TerrainMesh) -> Result<(), RenderError> {
    mesh.validate()
        .map_err(|e| RenderError::InvalidMesh(e.to_string()))
}
