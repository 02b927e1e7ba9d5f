//! The in-memory raster produced by capturing a region.
//!
//! A [`Bitmap`] is always opaque RGB8: transparent captures are flattened onto
//! a background color at construction time, so everything downstream (slicing,
//! image re-encoding) can treat the pixels as plain RGB rows.

use crate::color::Color;
use crate::geometry::PixelSize;
use image::{Rgb, RgbImage, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    #[error("Bitmap has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Pixel buffer of {actual} bytes does not match a {width}x{height} RGB raster")]
    BufferSize { width: u32, height: u32, actual: usize },
}

/// A read-only, non-empty RGB raster.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbImage,
}

impl Bitmap {
    /// Wraps an RGB image buffer.
    pub fn from_rgb(pixels: RgbImage) -> Result<Self, BitmapError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(BitmapError::Empty { width, height });
        }
        Ok(Self { pixels })
    }

    /// Flattens an RGBA image onto `background`.
    pub fn from_rgba(rgba: &RgbaImage, background: Color) -> Result<Self, BitmapError> {
        let (width, height) = rgba.dimensions();
        let bg = [background.r, background.g, background.b];
        let flattened = RgbImage::from_fn(width, height, |x, y| {
            let px = rgba.get_pixel(x, y).0;
            let alpha = px[3] as u32;
            let mut out = [0u8; 3];
            for (i, channel) in out.iter_mut().enumerate() {
                let blended = px[i] as u32 * alpha + bg[i] as u32 * (255 - alpha);
                *channel = ((blended + 127) / 255) as u8;
            }
            Rgb(out)
        });
        Self::from_rgb(flattened)
    }

    /// Builds a bitmap from raw, row-major RGB8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let actual = data.len();
        let pixels = RgbImage::from_raw(width, height, data).ok_or(BitmapError::BufferSize {
            width,
            height,
            actual,
        })?;
        Self::from_rgb(pixels)
    }

    /// A bitmap of a single solid color.
    pub fn filled(size: PixelSize, color: Color) -> Result<Self, BitmapError> {
        Self::from_rgb(RgbImage::from_pixel(
            size.width,
            size.height,
            Rgb([color.r, color.g, color.b]),
        ))
    }

    pub fn size(&self) -> PixelSize {
        let (width, height) = self.pixels.dimensions();
        PixelSize { width, height }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size().aspect_ratio()
    }

    /// Copies the full-width band of rows `[y, y + height)`.
    ///
    /// The band is clamped to the bitmap, so a request running past the last
    /// row yields only the rows that exist.
    pub fn crop_rows(&self, y: u32, height: u32) -> RgbImage {
        let y = y.min(self.height());
        let height = height.min(self.height() - y);
        image::imageops::crop_imm(&self.pixels, 0, y, self.width(), height).to_image()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}
