//! Synthetic overlay rasters.
//!
//! The overlays use the same colour scheme as the model output: green for high
//! potential, yellow for moderate and red for low.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

pub const HIGH_GREEN: Rgba<u8> = Rgba([34, 177, 76, 255]);
pub const MODERATE_YELLOW: Rgba<u8> = Rgba([240, 220, 40, 255]);
pub const LOW_RED: Rgba<u8> = Rgba([220, 40, 40, 255]);

/// An overlay filled with a single colour.
pub fn solid_overlay(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// An overlay split into three horizontal bands, north to south:
/// high, moderate, low.
///
/// # Example
///
/// ```
/// use test_utils::{banded_overlay, HIGH_GREEN, LOW_RED};
///
/// let img = banded_overlay(6, 6);
/// assert_eq!(*img.get_pixel(0, 0), HIGH_GREEN);
/// assert_eq!(*img.get_pixel(0, 5), LOW_RED);
/// ```
pub fn banded_overlay(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        let band = y * 3 / height.max(1);
        match band {
            0 => HIGH_GREEN,
            1 => MODERATE_YELLOW,
            _ => LOW_RED,
        }
    })
}

/// Encode an overlay as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .expect("PNG encoding of an in-memory image");
    buf
}

/// Write an overlay as `gwp_overlay.png` inside `dir`.
pub fn write_overlay(dir: &Path, img: &RgbaImage) -> PathBuf {
    let path = dir.join("gwp_overlay.png");
    std::fs::write(&path, encode_png(img)).expect("write overlay");
    path
}
