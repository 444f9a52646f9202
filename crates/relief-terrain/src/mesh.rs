//! Terrain mesh generation

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use relief_core::{ReliefError, Result, Vec3};
use serde::Serialize;

use crate::heightmap::HeightField;
use crate::terrain::{ColorPolicy, MesherConfig, NormalPolicy};

/// Grid geometry ready for upload: four parallel vertex arrays plus indices.
///
/// Vertex `x * interval + z` sits at column `x`, row `z`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainMesh {
    /// Vertices per axis
    pub interval: u32,
    /// World-space extent along X and Z
    pub size: f32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    /// Two triangles per cell, six indices per cell
    pub indices: Vec<u16>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// The six indices emitted for cell (i, j)
    pub fn cell_indices(&self, i: u32, j: u32) -> &[u16] {
        let edges = self.interval - 1;
        let start = ((i * edges + j) * 6) as usize;
        &self.indices[start..start + 6]
    }

    /// Lowest and highest vertex Y
    pub fn height_range(&self) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])))
    }

    /// Check the array-length and index-range invariants.
    pub fn validate(&self) -> Result<()> {
        let expected_verts = (self.interval as usize).pow(2);
        let expected_indices = (self.interval.saturating_sub(1) as usize).pow(2) * 6;

        for (name, len) in [
            ("positions", self.positions.len()),
            ("normals", self.normals.len()),
            ("colors", self.colors.len()),
        ] {
            if len != expected_verts {
                return Err(ReliefError::InvalidMesh(format!(
                    "{} has {} entries, expected {}",
                    name, len, expected_verts
                )));
            }
        }
        if self.indices.len() != expected_indices {
            return Err(ReliefError::InvalidMesh(format!(
                "indices has {} entries, expected {}",
                self.indices.len(),
                expected_indices
            )));
        }
        if let Some(bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= expected_verts)
        {
            return Err(ReliefError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad, expected_verts
            )));
        }
        Ok(())
    }
}

/// Triangulate a height field into a centered grid mesh.
///
/// Fails fast on degenerate grid parameters rather than emitting a broken
/// index buffer.
pub fn generate<H>(field: &H, config: &MesherConfig) -> Result<TerrainMesh>
where
    H: HeightField + ?Sized,
{
    config.validate()?;

    let interval = config.interval;
    let edges = interval - 1;
    let size = config.size;
    let half = size / 2.0;
    let delta = 1.0 / edges as f32;

    let vert_count = config.vertex_count();
    let mut positions = Vec::with_capacity(vert_count);
    let mut normals = Vec::with_capacity(vert_count);
    let mut colors = Vec::with_capacity(vert_count);
    let mut palette = Palette::new(&config.color);

    for x in 0..interval {
        for z in 0..interval {
            let u = x as f32 / edges as f32;
            let v = z as f32 / edges as f32;
            let sample = field.height(u, v);

            positions.push([u * size - half, sample * config.height_scale, v * size - half]);
            normals.push(estimate_normal(field, u, v, delta, config));
            colors.push(palette.color(sample));
        }
    }

    let mesh = TerrainMesh {
        interval,
        size,
        positions,
        normals,
        colors,
        indices: grid_indices(interval),
    };

    tracing::debug!(
        interval,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        deterministic = config.color.is_deterministic(),
        "generated terrain mesh"
    );
    Ok(mesh)
}

/// Central difference over the four neighbours one grid step away.
/// Neighbours past the edge read the out-of-bounds sentinel.
fn estimate_normal<H>(field: &H, u: f32, v: f32, delta: f32, config: &MesherConfig) -> [f32; 3]
where
    H: HeightField + ?Sized,
{
    let left = field.height(u - delta, v);
    let right = field.height(u + delta, v);
    let up = field.height(u, v - delta);
    let down = field.height(u, v + delta);

    let normal = Vec3::new(left - right, config.normal_weight, down - up);
    match config.normals {
        NormalPolicy::Raw => normal.to_array(),
        NormalPolicy::Normalized => normal.normalized().to_array(),
    }
}

/// Two triangles per cell with a fixed winding:
/// `(c, c+1, c+n)` and `(c+1, c+n+1, c+n)` where `c = i*n + j`.
fn grid_indices(interval: u32) -> Vec<u16> {
    let edges = interval - 1;
    let mut indices = Vec::with_capacity((edges * edges * 6) as usize);

    for i in 0..edges {
        for j in 0..edges {
            let corner = i * interval + j;
            let next = corner + 1;
            let below = corner + interval;
            let diagonal = below + 1;

            indices.extend(
                [corner, next, below, next, diagonal, below]
                    .into_iter()
                    .map(|index| index as u16),
            );
        }
    }

    indices
}

/// Per-vertex color source built from a `ColorPolicy`
enum Palette {
    Constant([f32; 3]),
    Random(SmallRng),
    Height { low: [f32; 3], high: [f32; 3] },
}

impl Palette {
    fn new(policy: &ColorPolicy) -> Self {
        match policy {
            ColorPolicy::Constant { value } => Palette::Constant(*value),
            ColorPolicy::Random { seed: Some(seed) } => {
                Palette::Random(SmallRng::seed_from_u64(*seed))
            }
            ColorPolicy::Random { seed: None } => Palette::Random(SmallRng::from_entropy()),
            ColorPolicy::Height { low, high } => Palette::Height {
                low: *low,
                high: *high,
            },
        }
    }

    fn color(&mut self, sample: f32) -> [f32; 3] {
        match self {
            Palette::Constant(value) => *value,
            Palette::Random(rng) => [rng.gen(), rng.gen(), rng.gen()],
            Palette::Height { low, high } => {
                let t = sample.clamp(0.0, 1.0);
                [
                    low[0] + (high[0] - low[0]) * t,
                    low[1] + (high[1] - low[1]) * t,
                    low[2] + (high[2] - low[2]) * t,
                ]
            }
        }
    }
}
