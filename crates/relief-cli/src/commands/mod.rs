//! CLI command implementations

pub mod mesh;
pub mod render;
pub mod view;
