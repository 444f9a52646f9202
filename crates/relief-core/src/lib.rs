//! Relief Core - Foundational types for the Relief terrain viewer
//!
//! This crate provides the types that all other Relief crates depend on:
//! - `Vec3`, `Placement` - Spatial types
//! - `Mat4` column-major matrix alias and `IDENTITY`
//! - Error types and Result alias

mod error;
mod types;

pub use error::{ReliefError, Result};
pub use types::{Mat4, Placement, Vec3, IDENTITY};
