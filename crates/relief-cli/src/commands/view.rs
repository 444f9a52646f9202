//! View command: animate a scene in a window until it is closed

use anyhow::{Context, Result};
use relief_render::{draw_frame, GpuTerrainMesh, MeshRenderer, SceneConfig, SurfaceRenderer};
use relief_terrain::TerrainMesh;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

pub fn run(scene_path: &Path) -> Result<()> {
    let scene = SceneConfig::load(scene_path)
        .with_context(|| format!("Failed to load scene {}", scene_path.display()))?;
    let mesh = scene.build_mesh().context("Failed to build terrain mesh")?;

    println!("Controls:");
    println!("  Escape   - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(scene, mesh);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct ViewerApp {
    scene: SceneConfig,
    mesh: TerrainMesh,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    gpu_mesh: Option<GpuTerrainMesh>,
    start: Instant,
    error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(scene: SceneConfig, mesh: TerrainMesh) -> Self {
        Self {
            scene,
            mesh,
            window: None,
            renderer: None,
            gpu_mesh: None,
            start: Instant::now(),
            error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Relief")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("Failed to create window")?,
        );

        let mut renderer = pollster::block_on(SurfaceRenderer::new(window.clone()))
            .context("Failed to create render context")?;
        let gpu_mesh = renderer
            .upload_mesh(&self.mesh)
            .context("Failed to upload terrain mesh")?;

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.gpu_mesh = Some(gpu_mesh);
        self.start = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(renderer), Some(gpu_mesh)) = (&mut self.renderer, &self.gpu_mesh) else {
                    return;
                };

                let time_ms = self.start.elapsed().as_secs_f64() * 1000.0;
                if let Err(e) = draw_frame(renderer, gpu_mesh, &self.scene, time_ms) {
                    self.fail(event_loop, e.into());
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
