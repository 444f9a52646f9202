//! Scene file: which heightmap to mesh and how to animate it

use relief_core::{Placement, ReliefError, Result, Vec3};
use relief_terrain::{generate, Heightmap, MesherConfig, TerrainMesh};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root structure of a scene TOML file. Every table is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain: TerrainSource,
    pub mesher: MesherConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub model: ModelConfig,
    /// Directory relative paths resolve against (the scene file's parent)
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Where the height field comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSource {
    pub heightmap: PathBuf,
}

impl Default for TerrainSource {
    fn default() -> Self {
        Self {
            heightmap: PathBuf::from("noise.png"),
        }
    }
}

/// Camera orbit around the target, one revolution every `2π / orbit_speed` seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub orbit_radius: f32,
    pub orbit_height: f32,
    /// Radians per second
    pub orbit_speed: f32,
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 10.0,
            orbit_height: 10.0,
            orbit_speed: 0.2,
            target: [0.0, 0.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 300.0,
        }
    }
}

/// Global directional light whose intensity pulses over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub enabled: bool,
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub base_intensity: f32,
    pub pulse_amplitude: f32,
    /// Radians per second
    pub pulse_frequency: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: [1.0, 0.5, 0.0],
            color: [1.0, 0.5, 0.0],
            base_intensity: 0.2,
            pulse_amplitude: 0.2,
            pulse_frequency: 1.0,
        }
    }
}

/// World placement of the terrain mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub position: [f32; 3],
    /// Rotation about Y in radians
    pub rotation_y: f32,
}

impl ModelConfig {
    pub fn placement(&self) -> Placement {
        Placement::new(Vec3::from_array(self.position), self.rotation_y)
    }
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut scene = Self::from_toml_str(&content)?;
        scene.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::info!(scene = %path.display(), "loaded scene");
        Ok(scene)
    }

    /// Load a scene from a TOML string; relative paths resolve against the working directory
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scene: SceneConfig = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check every table for values the renderer cannot use
    pub fn validate(&self) -> Result<()> {
        self.mesher.validate()?;

        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(ReliefError::SceneError(format!(
                "camera.fov must be between 0 and 180 degrees, got {}",
                camera.fov
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ReliefError::SceneError(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if Vec3::from_array(self.light.direction).length() == 0.0 {
            return Err(ReliefError::SceneError(
                "light.direction must not be the zero vector".to_string(),
            ));
        }
        Ok(())
    }

    /// Heightmap path resolved against the scene file's directory
    pub fn heightmap_path(&self) -> PathBuf {
        self.base_dir.join(&self.terrain.heightmap)
    }

    /// Load the heightmap and triangulate it with this scene's mesher settings
    pub fn build_mesh(&self) -> Result<TerrainMesh> {
        let heightmap = Heightmap::open(&self.heightmap_path())?;
        generate(&heightmap, &self.mesher)
    }
}
