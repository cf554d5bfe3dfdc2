//! Classified GWP overlay raster.
//!
//! The overlay is the rendered output of the segmentation model: a colour
//! image covering the district bounding box where green marks high potential,
//! yellow moderate and red low.

use std::path::{Path, PathBuf};

use gwp_common::{BoundingBox, GwpClass, GwpError, GwpResult};
use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

/// Share of raster pixels per class, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassShares {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

/// A decoded overlay raster georeferenced to a bounding box.
#[derive(Debug, Clone)]
pub struct GwpRaster {
    pixels: RgbaImage,
    bounds: BoundingBox,
    path: Option<PathBuf>,
    shares: ClassShares,
}

impl GwpRaster {
    /// Decode an overlay from encoded bytes (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8], bounds: BoundingBox) -> GwpResult<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| GwpError::Raster(e.to_string()))?;
        Self::from_image(decoded.to_rgba8(), bounds)
    }

    /// Wrap an already decoded image.
    pub fn from_image(pixels: RgbaImage, bounds: BoundingBox) -> GwpResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(GwpError::Raster("overlay image is empty".to_string()));
        }

        let shares = count_shares(&pixels);
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            high = shares.high,
            "Classified overlay pixels"
        );
        Ok(Self {
            pixels,
            bounds,
            path: None,
            shares,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Record the file the overlay was decoded from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Map a coordinate to `(x, y)` pixel indices.
    ///
    /// Row 0 is the northern edge. Indices are clamped to the image so points
    /// on (or beyond) the far edges resolve to the last row/column.
    pub fn latlon_to_pixel(&self, lat: f64, lon: f64) -> (u32, u32) {
        let width = self.pixels.width();
        let height = self.pixels.height();

        let norm_lat = (lat - self.bounds.min_y) / self.bounds.height();
        let norm_lon = (lon - self.bounds.min_x) / self.bounds.width();

        let x = (norm_lon * width as f64).trunc() as i64;
        let y = ((1.0 - norm_lat) * height as f64).trunc() as i64;

        (
            x.clamp(0, width as i64 - 1) as u32,
            y.clamp(0, height as i64 - 1) as u32,
        )
    }

    /// GWP class of the pixel under a coordinate.
    pub fn class_at(&self, lat: f64, lon: f64) -> GwpClass {
        let (x, y) = self.latlon_to_pixel(lat, lon);
        classify_color(self.pixels.get_pixel(x, y).0)
    }

    /// Class distribution over the whole raster.
    pub fn class_shares(&self) -> ClassShares {
        self.shares
    }
}

/// Classify an overlay colour.
///
/// Green-dominant pixels are high potential; bright red+green (yellow) is
/// moderate; everything else, including transparent background, is low.
pub fn classify_color(rgba: [u8; 4]) -> GwpClass {
    let [r, g, b, _] = rgba;
    if g > r && g > b {
        GwpClass::High
    } else if r > 150 && g > 150 {
        GwpClass::Moderate
    } else {
        GwpClass::Low
    }
}

fn count_shares(pixels: &RgbaImage) -> ClassShares {
    let counts = pixels
        .as_raw()
        .par_chunks_exact(4)
        .fold(
            || [0u64; 3],
            |mut acc, px| {
                let class = classify_color([px[0], px[1], px[2], px[3]]);
                acc[class.value() as usize] += 1;
                acc
            },
        )
        .reduce(|| [0u64; 3], |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2]]);

    let total = (counts[0] + counts[1] + counts[2]) as f64;
    if total == 0.0 {
        return ClassShares::default();
    }

    ClassShares {
        low: counts[0] as f64 / total * 100.0,
        moderate: counts[1] as f64 / total * 100.0,
        high: counts[2] as f64 / total * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn quadrant_raster() -> GwpRaster {
        // 4x4: north half green, south-west yellow, south-east red
        let img = RgbaImage::from_fn(4, 4, |x, y| {
            if y < 2 {
                Rgba([20, 200, 20, 255])
            } else if x < 2 {
                Rgba([230, 220, 40, 255])
            } else {
                Rgba([220, 30, 30, 255])
            }
        });
        GwpRaster::from_image(img, BoundingBox::DHARWAD).unwrap()
    }

    #[test]
    fn test_classify_color() {
        assert_eq!(classify_color([0, 128, 0, 255]), GwpClass::High);
        assert_eq!(classify_color([255, 255, 0, 255]), GwpClass::Moderate);
        assert_eq!(classify_color([255, 0, 0, 255]), GwpClass::Low);
        assert_eq!(classify_color([0, 0, 0, 0]), GwpClass::Low);
    }

    #[test]
    fn test_pixel_mapping_inverts_y() {
        let raster = quadrant_raster();
        // North-west corner
        assert_eq!(raster.latlon_to_pixel(15.99, 74.51), (0, 0));
        // South-east corner clamps into the image
        assert_eq!(raster.latlon_to_pixel(15.0, 75.5), (3, 3));
    }

    #[test]
    fn test_class_at() {
        let raster = quadrant_raster();
        assert_eq!(raster.class_at(15.9, 75.0), GwpClass::High);
        assert_eq!(raster.class_at(15.1, 74.6), GwpClass::Moderate);
        assert_eq!(raster.class_at(15.1, 75.4), GwpClass::Low);
    }

    #[test]
    fn test_class_shares() {
        let shares = quadrant_raster().class_shares();
        assert_eq!(shares.high, 50.0);
        assert_eq!(shares.moderate, 25.0);
        assert_eq!(shares.low, 25.0);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = RgbaImage::new(0, 0);
        assert!(GwpRaster::from_image(img, BoundingBox::DHARWAD).is_err());
    }
}
