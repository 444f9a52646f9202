//! Height field sampling

use std::fmt;
use std::path::Path;

use relief_core::{ReliefError, Result};

/// One height lookup: `height` in [0..1] and the source texel's alpha in [0..1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub height: f32,
    pub alpha: f32,
}

impl HeightSample {
    /// Returned for any lookup outside the unit square: full height, no data.
    pub const OUT_OF_BOUNDS: Self = Self {
        height: 1.0,
        alpha: 0.0,
    };

    /// A fully opaque sample
    pub fn opaque(height: f32) -> Self {
        Self { height, alpha: 1.0 }
    }

    /// True when the sample carries no data (edge of the field)
    pub fn is_edge(&self) -> bool {
        self.alpha == 0.0
    }
}

/// A 2D scalar field addressed by normalized (u, v) coordinates.
///
/// Implementors only answer for coordinates inside [0, 1] x [0, 1];
/// `sample` applies the out-of-bounds sentinel uniformly for every source.
pub trait HeightField {
    /// Sample at (u, v), both already known to lie in [0, 1].
    fn sample_inside(&self, u: f32, v: f32) -> HeightSample;

    /// The mesher reads only `height`; `alpha` is left for callers that care about edges.
    fn sample(&self, u: f32, v: f32) -> HeightSample {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return HeightSample::OUT_OF_BOUNDS;
        }
        self.sample_inside(u, v)
    }

    /// Height only, sentinel included
    fn height(&self, u: f32, v: f32) -> f32 {
        self.sample(u, v).height
    }
}

impl<F> HeightField for F
where
    F: Fn(f32, f32) -> f32,
{
    fn sample_inside(&self, u: f32, v: f32) -> HeightSample {
        HeightSample::opaque(self(u, v))
    }
}

/// A raster heightmap: the red channel is the height, alpha is kept for edge detection.
///
/// Lookups are nearest-texel, matching how the terrain was authored.
pub struct Heightmap {
    /// Row-major (red, alpha) texels
    texels: Vec<[u8; 2]>,
    /// Width in pixels
    pub width: u32,
    /// Depth (image height) in pixels
    pub depth: u32,
}

impl fmt::Debug for Heightmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heightmap")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl Heightmap {
    /// Load a heightmap from an image file (grayscale or RGBA).
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| ReliefError::HeightmapLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let heightmap = Self::from_image(&img).map_err(|e| ReliefError::HeightmapLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            path = %path.display(),
            width = heightmap.width,
            depth = heightmap.depth,
            "loaded heightmap"
        );
        Ok(heightmap)
    }

    /// Build from a decoded image. Grayscale images expand to an opaque red channel.
    pub fn from_image(img: &image::DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba8();
        let (width, depth) = rgba.dimensions();
        let texels = rgba.pixels().map(|p| [p.0[0], p.0[3]]).collect();
        Self::from_texels(texels, width, depth)
    }

    /// Create an opaque heightmap from raw red-channel bytes
    pub fn from_raw(red: Vec<u8>, width: u32, depth: u32) -> Result<Self> {
        let texels = red.into_iter().map(|r| [r, u8::MAX]).collect();
        Self::from_texels(texels, width, depth)
    }

    fn from_texels(texels: Vec<[u8; 2]>, width: u32, depth: u32) -> Result<Self> {
        if width == 0 || depth == 0 {
            return Err(ReliefError::InvalidGrid(format!(
                "heightmap must be at least 1x1, got {}x{}",
                width, depth
            )));
        }
        if texels.len() != (width as usize) * (depth as usize) {
            return Err(ReliefError::InvalidGrid(format!(
                "expected {} texels for a {}x{} heightmap, got {}",
                width as usize * depth as usize,
                width,
                depth,
                texels.len()
            )));
        }
        Ok(Self {
            texels,
            width,
            depth,
        })
    }

    fn texel(&self, x: u32, y: u32) -> [u8; 2] {
        self.texels[(y as usize) * (self.width as usize) + x as usize]
    }
}

impl HeightField for Heightmap {
    fn sample_inside(&self, u: f32, v: f32) -> HeightSample {
        let x = ((u * (self.width - 1) as f32).floor() as u32).min(self.width - 1);
        let y = ((v * (self.depth - 1) as f32).floor() as u32).min(self.depth - 1);
        let [red, alpha] = self.texel(x, y);

        HeightSample {
            height: red as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_applies_exactly_outside_unit_square() {
        let field = |_u: f32, _v: f32| 0.25_f32;

        assert_eq!(field.sample(0.0, 0.0), HeightSample::opaque(0.25));
        assert_eq!(field.sample(1.0, 1.0), HeightSample::opaque(0.25));
        assert_eq!(field.sample(0.5, 1.0), HeightSample::opaque(0.25));

        let outside = [
            (-f32::EPSILON, 0.5),
            (1.0 + f32::EPSILON, 0.5),
            (0.5, -0.001),
            (0.5, 1.001),
            (f32::NAN, 0.5),
        ];
        for (u, v) in outside {
            let s = field.sample(u, v);
            assert_eq!(s, HeightSample::OUT_OF_BOUNDS, "({u}, {v})");
            assert!(s.is_edge());
        }
    }

    #[test]
    fn red_channel_maps_to_unit_range() {
        let hm = Heightmap::from_raw(vec![0, 51, 102, 255], 2, 2).unwrap();
        assert_eq!(hm.height(0.0, 0.0), 0.0);
        assert!((hm.height(1.0, 0.0) - 0.2).abs() < 1e-6);
        assert!((hm.height(0.0, 1.0) - 0.4).abs() < 1e-6);
        assert_eq!(hm.height(1.0, 1.0), 1.0);
        assert_eq!(hm.sample(0.5, 0.5).alpha, 1.0);
    }

    #[test]
    fn lookups_are_row_major_by_width() {
        // 3 wide, 2 tall: a non-square map must index rows by width
        let hm = Heightmap::from_raw(vec![0, 0, 0, 0, 0, 255], 3, 2).unwrap();
        assert_eq!(hm.height(1.0, 1.0), 1.0);
        assert_eq!(hm.height(1.0, 0.0), 0.0);
    }

    #[test]
    fn nearest_texel_floors() {
        let hm = Heightmap::from_raw(vec![0, 255], 2, 1).unwrap();
        // 0.99 * (2 - 1) floors to column 0
        assert_eq!(hm.height(0.99, 0.0), 0.0);
        assert_eq!(hm.height(1.0, 0.0), 1.0);
    }

    #[test]
    fn alpha_survives_from_rgba_images() {
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 0]));
        let hm = Heightmap::from_image(&image::DynamicImage::ImageRgba8(img)).unwrap();
        let s = hm.sample(0.0, 0.0);
        assert_eq!(s.height, 1.0);
        assert!(s.is_edge());
    }

    #[test]
    fn mesher_ignores_alpha() {
        let rgba = |alpha| {
            let img = image::RgbaImage::from_fn(3, 3, |x, y| {
                image::Rgba([(x * 40 + y * 70) as u8, 0, 0, alpha])
            });
            Heightmap::from_image(&image::DynamicImage::ImageRgba8(img)).unwrap()
        };
        let config = crate::MesherConfig::new(4, 2.0, 1.0);
        let transparent = crate::generate(&rgba(0), &config).unwrap();
        let opaque = crate::generate(&rgba(255), &config).unwrap();
        assert_eq!(transparent, opaque);
    }

    #[test]
    fn grayscale_images_are_opaque() {
        let img = image::GrayImage::from_pixel(2, 2, image::Luma([128]));
        let hm = Heightmap::from_image(&image::DynamicImage::ImageLuma8(img)).unwrap();
        let s = hm.sample(0.5, 0.5);
        assert!((s.height - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(s.alpha, 1.0);
    }

    #[test]
    fn mismatched_raw_data_is_rejected() {
        assert!(Heightmap::from_raw(vec![0; 3], 2, 2).is_err());
        assert!(Heightmap::from_raw(Vec::new(), 0, 0).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Heightmap::open(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, ReliefError::HeightmapLoad { .. }));
        assert!(err.to_string().contains("does/not/exist.png"));
    }

    #[test]
    fn debug_shows_dimensions_not_texels() {
        let hm = Heightmap::from_raw(vec![7; 6], 3, 2).unwrap();
        assert_eq!(format!("{:?}", hm), "Heightmap { width: 3, depth: 2, .. }");
    }
}
