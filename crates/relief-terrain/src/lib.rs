//! Relief Terrain - Heightmap-to-mesh triangulation
//!
//! Samples a height field on a regular grid and produces raw vertex data
//! (positions, normals, colors) plus a 16-bit triangle index list. Does not
//! depend on relief-render; the renderer consumes `TerrainMesh` as-is.

pub mod heightmap;
pub mod mesh;
pub mod terrain;

pub use heightmap::{HeightField, HeightSample, Heightmap};
pub use mesh::{generate, TerrainMesh};
pub use terrain::{ColorPolicy, MesherConfig, NormalPolicy, MAX_INTERVAL};
