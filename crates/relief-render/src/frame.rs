//! Per-frame state: camera orbit, light pulse and the uniforms derived from them
//!
//! Everything here is a pure function of the frame timestamp and the scene
//! configuration; the only mutable state in the animation is the clock.

use relief_core::{Mat4, Vec3};

use crate::backend::MeshRenderer;
use crate::camera::Camera;
use crate::context::RenderError;
use crate::pipeline::FrameUniforms;
use crate::scene::{CameraConfig, LightConfig, SceneConfig};

/// Display timestamps arrive in milliseconds
const SECONDS_PER_MS: f64 = 0.001;

/// Camera position on its orbit `time` seconds in
pub fn orbit_position(time: f32, camera: &CameraConfig) -> Vec3 {
    let angle = time * camera.orbit_speed;
    Vec3::new(
        angle.sin() * camera.orbit_radius,
        camera.orbit_height,
        angle.cos() * camera.orbit_radius,
    )
}

/// Light intensity `time` seconds in; zero when the light is disabled
pub fn light_intensity(time: f32, light: &LightConfig) -> f32 {
    if !light.enabled {
        return 0.0;
    }
    (time * light.pulse_frequency).sin() * light.pulse_amplitude + light.base_intensity
}

/// Everything that changes from one frame to the next
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    /// Seconds since the animation started
    pub time: f32,
    pub camera: Camera,
    pub light_direction: [f32; 3],
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    pub model: Mat4,
}

impl FrameState {
    /// Compute the frame at `time_ms` milliseconds for a target of the given aspect ratio
    pub fn at(time_ms: f64, scene: &SceneConfig, aspect: f32) -> Self {
        let time = (time_ms * SECONDS_PER_MS) as f32;
        let camera_config = &scene.camera;

        let camera = Camera {
            position: orbit_position(time, camera_config),
            target: Vec3::from_array(camera_config.target),
            up: Vec3::UP,
            fov: camera_config.fov,
            near: camera_config.near,
            far: camera_config.far,
            aspect,
        };

        Self {
            time,
            camera,
            light_direction: scene.light.direction,
            light_color: scene.light.color,
            light_intensity: light_intensity(time, &scene.light),
            model: scene.model.placement().to_matrix(),
        }
    }

    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            perspective: self.camera.projection_matrix(),
            camera: self.camera.view_matrix(),
            model: self.model,
            light_direction: self.light_direction,
            light_intensity: self.light_intensity,
            light_color: self.light_color,
            time: self.time,
        }
    }
}

/// Compute frame state for `time_ms` and hand it to the backend for drawing.
pub fn draw_frame<R: MeshRenderer>(
    renderer: &mut R,
    mesh: &R::Mesh,
    scene: &SceneConfig,
    time_ms: f64,
) -> Result<FrameState, RenderError> {
    let frame = FrameState::at(time_ms, scene, renderer.aspect_ratio());
    renderer.draw_mesh(mesh, &frame.uniforms())?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_terrain::{generate, MesherConfig, TerrainMesh};

    /// Backend double that records what the frame loop asked for
    #[derive(Default)]
    struct RecordingRenderer {
        uploads: usize,
        draws: Vec<(usize, FrameUniforms)>,
    }

    impl MeshRenderer for RecordingRenderer {
        type Mesh = usize;

        fn upload_mesh(&mut self, mesh: &TerrainMesh) -> Result<usize, RenderError> {
            crate::backend::check_mesh(mesh)?;
            self.uploads += 1;
            Ok(mesh.indices.len())
        }

        fn draw_mesh(&mut self, mesh: &usize, uniforms: &FrameUniforms) -> Result<(), RenderError> {
            self.draws.push((*mesh, *uniforms));
            Ok(())
        }

        fn aspect_ratio(&self) -> f32 {
            2.0
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn orbit_starts_on_positive_z() {
        let p = orbit_position(0.0, &CameraConfig::default());
        assert_eq!(p, Vec3::new(0.0, 10.0, 10.0));
    }

    #[test]
    fn orbit_keeps_radius_and_height() {
        let config = CameraConfig::default();
        for t in [0.5, 3.0, 17.25, 1000.0] {
            let p = orbit_position(t, &config);
            assert!(close((p.x * p.x + p.z * p.z).sqrt(), 10.0));
            assert_eq!(p.y, 10.0);
        }
    }

    #[test]
    fn orbit_quarter_turn() {
        let config = CameraConfig::default();
        // speed 0.2 rad/s reaches π/2 after 2.5π seconds
        let p = orbit_position(2.5 * std::f32::consts::PI, &config);
        assert!(close(p.x, 10.0));
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn light_pulses_between_zero_and_double_base() {
        let light = LightConfig::default();
        assert!(close(light_intensity(0.0, &light), 0.2));
        assert!(close(light_intensity(std::f32::consts::FRAC_PI_2, &light), 0.4));
        assert!(close(light_intensity(3.0 * std::f32::consts::FRAC_PI_2, &light), 0.0));
    }

    #[test]
    fn disabled_light_is_dark() {
        let light = LightConfig {
            enabled: false,
            ..LightConfig::default()
        };
        assert_eq!(light_intensity(1.0, &light), 0.0);
    }

    #[test]
    fn milliseconds_become_seconds() {
        let frame = FrameState::at(1500.0, &SceneConfig::default(), 1.0);
        assert!(close(frame.time, 1.5));
        assert!(close(frame.uniforms().time, 1.5));
    }

    #[test]
    fn frame_uses_scene_constants() {
        let frame = FrameState::at(0.0, &SceneConfig::default(), 1.5);
        assert_eq!(frame.camera.fov, 45.0);
        assert_eq!(frame.camera.near, 0.1);
        assert_eq!(frame.camera.far, 300.0);
        assert_eq!(frame.camera.aspect, 1.5);
        assert_eq!(frame.light_direction, [1.0, 0.5, 0.0]);
        assert_eq!(frame.light_color, [1.0, 0.5, 0.0]);
        assert_eq!(frame.model, relief_core::IDENTITY);
    }

    #[test]
    fn uniforms_carry_camera_and_model_matrices() {
        let scene = SceneConfig {
            model: crate::scene::ModelConfig {
                position: [1.0, 0.0, -2.0],
                rotation_y: 0.5,
            },
            ..SceneConfig::default()
        };
        let frame = FrameState::at(4_000.0, &scene, 1.25);
        let uniforms = frame.uniforms();

        assert_eq!(uniforms.perspective, frame.camera.projection_matrix());
        assert_eq!(uniforms.camera, frame.camera.view_matrix());
        assert_eq!(uniforms.model, scene.model.placement().to_matrix());
        assert_eq!(uniforms.light_intensity, frame.light_intensity);
    }

    #[test]
    fn same_timestamp_same_uniforms() {
        let scene = SceneConfig::default();
        let a = FrameState::at(12_345.0, &scene, 1.0).uniforms();
        let b = FrameState::at(12_345.0, &scene, 1.0).uniforms();
        assert_eq!(a, b);
    }

    #[test]
    fn frame_loop_uploads_once_and_draws_every_frame() {
        let scene = SceneConfig::default();
        let mesh = generate(&|_u: f32, _v: f32| 0.5_f32, &MesherConfig::new(4, 2.0, 1.0)).unwrap();

        let mut renderer = RecordingRenderer::default();
        let handle = renderer.upload_mesh(&mesh).unwrap();

        let mut last_time = -1.0;
        for time_ms in [0.0, 16.7, 33.3, 50.0] {
            let frame = draw_frame(&mut renderer, &handle, &scene, time_ms).unwrap();
            assert!(frame.time > last_time);
            assert_eq!(frame.camera.aspect, 2.0);
            last_time = frame.time;
        }

        assert_eq!(renderer.uploads, 1);
        assert_eq!(renderer.draws.len(), 4);
        assert!(renderer.draws.iter().all(|(count, _)| *count == 54));
        // the camera moved between the first and last frame
        assert_ne!(renderer.draws[0].1.camera, renderer.draws[3].1.camera);
    }

    #[test]
    fn corrupt_meshes_never_reach_the_backend() {
        let mut mesh =
            generate(&|_u: f32, _v: f32| 0.0_f32, &MesherConfig::new(3, 1.0, 1.0)).unwrap();
        mesh.normals.clear();

        let mut renderer = RecordingRenderer::default();
        assert!(matches!(
            renderer.upload_mesh(&mesh),
            Err(RenderError::InvalidMesh(_))
        ));
        assert_eq!(renderer.uploads, 0);
    }
}
