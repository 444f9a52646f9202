//! Mesher configuration
//!
//! Every terrain variant is the same mesher under different settings, so the
//! per-variant choices (normal normalization, vertex coloring) are explicit
//! enums here instead of separate code paths.

use relief_core::{ReliefError, Result};
use serde::{Deserialize, Serialize};

/// Largest grid the 16-bit index buffer can address (256 x 256 vertices)
pub const MAX_INTERVAL: u32 = 256;

/// Whether estimated normals are scaled to unit length before upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalPolicy {
    /// Keep the raw central-difference vector `(dx, k, dz)`
    #[default]
    Raw,
    /// Scale to unit length
    Normalized,
}

/// How per-vertex colors are chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ColorPolicy {
    /// One color for every vertex
    Constant { value: [f32; 3] },
    /// Uniform random RGB in [0, 1]. A seed makes the colors reproducible.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Blend from `low` to `high` by the sampled height
    Height { low: [f32; 3], high: [f32; 3] },
}

impl Default for ColorPolicy {
    fn default() -> Self {
        ColorPolicy::Constant {
            value: [0.5, 1.0, 0.5],
        }
    }
}

impl ColorPolicy {
    /// True when two generations with the same inputs produce the same colors
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, ColorPolicy::Random { seed: None })
    }
}

/// Grid and shading parameters for one mesh generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Vertices per axis (at least 2)
    pub interval: u32,
    /// World-space extent along X and Z; the grid is centered on the origin
    pub size: f32,
    /// World-space Y for a sample of 1.0
    pub height_scale: f32,
    /// Vertical component `k` of the estimated normal
    pub normal_weight: f32,
    pub normals: NormalPolicy,
    pub color: ColorPolicy,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            interval: 100,
            size: 16.0,
            height_scale: 4.0,
            normal_weight: 0.5,
            normals: NormalPolicy::Raw,
            color: ColorPolicy::default(),
        }
    }
}

impl MesherConfig {
    pub fn new(interval: u32, size: f32, height_scale: f32) -> Self {
        Self {
            interval,
            size,
            height_scale,
            ..Self::default()
        }
    }

    pub fn with_normals(mut self, normals: NormalPolicy) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_color(mut self, color: ColorPolicy) -> Self {
        self.color = color;
        self
    }

    pub fn with_normal_weight(mut self, normal_weight: f32) -> Self {
        self.normal_weight = normal_weight;
        self
    }

    /// Reject parameters that would produce an empty or corrupt mesh.
    pub fn validate(&self) -> Result<()> {
        if self.interval < 2 {
            return Err(ReliefError::InvalidGrid(format!(
                "interval must be at least 2, got {}",
                self.interval
            )));
        }
        if self.interval > MAX_INTERVAL {
            return Err(ReliefError::InvalidGrid(format!(
                "interval {} needs {} vertices, more than 16-bit indices can address (max interval {})",
                self.interval,
                self.interval as u64 * self.interval as u64,
                MAX_INTERVAL
            )));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ReliefError::InvalidGrid(format!(
                "size must be a positive number, got {}",
                self.size
            )));
        }
        if !self.height_scale.is_finite() {
            return Err(ReliefError::InvalidGrid(format!(
                "height_scale must be finite, got {}",
                self.height_scale
            )));
        }
        if !self.normal_weight.is_finite() {
            return Err(ReliefError::InvalidGrid(format!(
                "normal_weight must be finite, got {}",
                self.normal_weight
            )));
        }
        Ok(())
    }

    /// Number of vertices the grid produces
    pub fn vertex_count(&self) -> usize {
        (self.interval as usize).pow(2)
    }

    /// Number of indices the grid produces
    pub fn index_count(&self) -> usize {
        (self.interval.saturating_sub(1) as usize).pow(2) * 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let config = MesherConfig::default();
        assert_eq!(config.interval, 100);
        assert_eq!(config.size, 16.0);
        assert_eq!(config.height_scale, 4.0);
        assert_eq!(config.normal_weight, 0.5);
        assert_eq!(config.normals, NormalPolicy::Raw);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn degenerate_intervals_are_rejected() {
        for interval in [0, 1] {
            let err = MesherConfig::new(interval, 1.0, 1.0).validate().unwrap_err();
            assert!(matches!(err, ReliefError::InvalidGrid(_)));
        }
        assert!(MesherConfig::new(2, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn index_overflow_is_rejected() {
        assert!(MesherConfig::new(MAX_INTERVAL, 1.0, 1.0).validate().is_ok());
        assert!(MesherConfig::new(MAX_INTERVAL + 1, 1.0, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn bad_extents_are_rejected() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(MesherConfig::new(4, size, 1.0).validate().is_err(), "{size}");
        }
        assert!(MesherConfig::new(4, 1.0, f32::NAN).validate().is_err());
        assert!(MesherConfig::new(4, 1.0, 1.0)
            .with_normal_weight(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn counts_follow_interval() {
        let config = MesherConfig::new(5, 1.0, 1.0);
        assert_eq!(config.vertex_count(), 25);
        assert_eq!(config.index_count(), 96);
    }

    #[test]
    fn parses_from_toml() {
        let config: MesherConfig = toml::from_str(
            r#"
            interval = 64
            normals = "normalized"
            [color]
            mode = "random"
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.interval, 64);
        assert_eq!(config.size, 16.0);
        assert_eq!(config.normals, NormalPolicy::Normalized);
        assert_eq!(config.color, ColorPolicy::Random { seed: Some(7) });
        assert!(config.color.is_deterministic());
    }

    #[test]
    fn unseeded_random_is_not_deterministic() {
        assert!(!ColorPolicy::Random { seed: None }.is_deterministic());
        assert!(ColorPolicy::default().is_deterministic());
    }
}
