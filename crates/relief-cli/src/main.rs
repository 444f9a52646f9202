//! Relief CLI - mesh, render and view heightmap terrain

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{mesh, render, view};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relief")]
#[command(about = "Heightmap terrain mesher and viewer", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Triangulate a heightmap and print mesh statistics
    Mesh {
        /// Path to heightmap image (red channel is height, alpha marks edges)
        heightmap: PathBuf,

        /// Vertices per grid side
        #[arg(long, default_value = "100")]
        interval: u32,

        /// World-space side length of the mesh
        #[arg(long, default_value = "16")]
        size: f32,

        /// Multiplier applied to sampled heights
        #[arg(long, default_value = "4")]
        height_scale: f32,

        /// Y component of the unnormalized normal before scaling
        #[arg(long, default_value = "0.5")]
        normal_weight: f32,

        /// Emit unit-length normals
        #[arg(long)]
        normalize: bool,

        /// Random per-vertex colors instead of the constant green
        #[arg(long)]
        random_colors: bool,

        /// Seed for --random-colors (reproducible output)
        #[arg(long, requires = "random_colors")]
        seed: Option<u64>,

        /// Dump the whole mesh as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Render a scene to a PNG image (headless)
    Render {
        /// Path to scene file
        scene: PathBuf,

        /// Output image path
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Animation timestamp in milliseconds
        #[arg(long, default_value = "0")]
        time_ms: f64,

        /// Vertical field of view in degrees
        #[arg(long)]
        fov: Option<f32>,

        /// Camera orbit radius
        #[arg(long)]
        orbit_radius: Option<f32>,
    },

    /// Open a window and animate a scene
    View {
        /// Path to scene file
        scene: PathBuf,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Mesh {
            heightmap,
            interval,
            size,
            height_scale,
            normal_weight,
            normalize,
            random_colors,
            seed,
            json,
        } => mesh::run(mesh::MeshArgs {
            heightmap,
            interval,
            size,
            height_scale,
            normal_weight,
            normalize,
            random_colors,
            seed,
            json,
        }),
        Commands::Render {
            scene,
            output,
            width,
            height,
            time_ms,
            fov,
            orbit_radius,
        } => render::run(render::RenderArgs {
            scene,
            output,
            width,
            height,
            time_ms,
            fov,
            orbit_radius,
        }),
        Commands::View { scene } => view::run(&scene),
    }
}
