//! Headless scene-to-PNG render command

use anyhow::{Context, Result};
use relief_render::{draw_frame, HeadlessRenderer, MeshRenderer, SceneConfig};
use std::path::PathBuf;

pub struct RenderArgs {
    pub scene: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub time_ms: f64,
    pub fov: Option<f32>,
    pub orbit_radius: Option<f32>,
}

/// Scene file with command-line camera overrides applied
fn load_scene(args: &RenderArgs) -> Result<SceneConfig> {
    let mut scene = SceneConfig::load(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    if let Some(fov) = args.fov {
        scene.camera.fov = fov;
    }
    if let Some(radius) = args.orbit_radius {
        scene.camera.orbit_radius = radius;
    }
    scene.validate().context("Invalid camera override")?;
    Ok(scene)
}

pub fn run(args: RenderArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("Image size must be non-zero, got {}x{}", args.width, args.height);
    }

    let scene = load_scene(&args)?;
    let mesh = scene.build_mesh().context("Failed to build terrain mesh")?;

    let mut renderer = pollster::block_on(HeadlessRenderer::new(args.width, args.height))
        .context("Failed to create headless render context")?;
    let gpu_mesh = renderer
        .upload_mesh(&mesh)
        .context("Failed to upload terrain mesh")?;

    let frame = draw_frame(&mut renderer, &gpu_mesh, &scene, args.time_ms)
        .context("Failed to draw frame")?;
    tracing::debug!(
        time = frame.time,
        light = frame.light_intensity,
        "rendered frame"
    );

    let pixels =
        pollster::block_on(renderer.read_pixels()).context("Failed to read rendered pixels")?;

    let img = image::RgbaImage::from_raw(args.width, args.height, pixels)
        .context("Failed to create image from pixel data")?;
    img.save(&args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;

    println!(
        "Rendered {}x{} image to {}",
        args.width,
        args.height,
        args.output.display()
    );

    Ok(())
}
