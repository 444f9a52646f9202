//! Heightmap-to-mesh command: triangulate and report, or dump as JSON

use anyhow::{Context, Result};
use relief_terrain::{generate, ColorPolicy, Heightmap, MesherConfig, NormalPolicy, TerrainMesh};
use std::io::Write;
use std::path::PathBuf;

pub struct MeshArgs {
    pub heightmap: PathBuf,
    pub interval: u32,
    pub size: f32,
    pub height_scale: f32,
    pub normal_weight: f32,
    pub normalize: bool,
    pub random_colors: bool,
    pub seed: Option<u64>,
    pub json: bool,
}

impl MeshArgs {
    fn mesher_config(&self) -> MesherConfig {
        let normals = if self.normalize {
            NormalPolicy::Normalized
        } else {
            NormalPolicy::Raw
        };
        let color = if self.random_colors {
            ColorPolicy::Random { seed: self.seed }
        } else {
            ColorPolicy::default()
        };

        MesherConfig::new(self.interval, self.size, self.height_scale)
            .with_normal_weight(self.normal_weight)
            .with_normals(normals)
            .with_color(color)
    }
}

pub fn run(args: MeshArgs) -> Result<()> {
    let config = args.mesher_config();
    config.validate().context("Invalid mesher settings")?;

    let heightmap = Heightmap::open(&args.heightmap)
        .with_context(|| format!("Failed to load heightmap {}", args.heightmap.display()))?;
    let mesh = generate(&heightmap, &config).context("Failed to generate mesh")?;

    if args.json {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &mesh).context("Failed to serialize mesh")?;
        writeln!(out)?;
        return Ok(());
    }

    println!(
        "Heightmap: {} ({}x{})",
        args.heightmap.display(),
        heightmap.width,
        heightmap.depth
    );
    for line in summary(&mesh) {
        println!("{}", line);
    }
    Ok(())
}

fn summary(mesh: &TerrainMesh) -> Vec<String> {
    let (low, high) = mesh.height_range();
    vec![
        format!("Grid: {0}x{0} over {1} units", mesh.interval, mesh.size),
        format!("Vertices: {}", mesh.vertex_count()),
        format!(
            "Triangles: {} ({} indices)",
            mesh.triangle_count(),
            mesh.indices.len()
        ),
        format!("Height range: {:.3} .. {:.3}", low, high),
    ]
}
