//! Relief Render - wgpu renderer for heightmap terrain
//!
//! Uploads a `TerrainMesh` once and redraws it every frame from an orbiting
//! camera under a pulsing directional light. The same pipeline draws into a
//! window surface or an offscreen texture for render-to-image.

mod backend;
mod camera;
mod context;
mod frame;
mod gpu_mesh;
mod headless;
mod pipeline;
mod renderer;
mod scene;

pub use backend::MeshRenderer;
pub use camera::Camera;
pub use context::{RenderContext, RenderError};
pub use frame::{draw_frame, light_intensity, orbit_position, FrameState};
pub use gpu_mesh::GpuTerrainMesh;
pub use headless::HeadlessContext;
pub use pipeline::{FrameUniforms, TerrainPipeline, DEPTH_FORMAT};
pub use renderer::{HeadlessRenderer, SurfaceRenderer};
pub use scene::{CameraConfig, LightConfig, ModelConfig, SceneConfig, TerrainSource};
